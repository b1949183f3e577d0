//! Price alerts: a subscriber's standing order to be told once the price
//! crosses a threshold.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AlertId, DestinationId, Region, SubscriberId};

/// Which side of the threshold fires the alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Fires when `price >= threshold`.
    #[default]
    Above,
    /// Fires when `price <= threshold`.
    Below,
}

impl Direction {
    /// Storage/wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }

    /// Whether `price` satisfies this direction against `threshold`.
    ///
    /// Both comparisons include the boundary.
    #[must_use]
    pub const fn is_met(self, price: u64, threshold: u64) -> bool {
        match self {
            Self::Above => price >= threshold,
            Self::Below => price <= threshold,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            _ => Err(DomainError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// A validated request to create an alert. The store assigns id and
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlert {
    pub subscriber_id: SubscriberId,
    pub destination_id: DestinationId,
    pub region: Region,
    pub threshold: u64,
    pub direction: Direction,
}

impl NewAlert {
    /// Build a new alert request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveThreshold`] when `threshold` is zero.
    pub fn try_new(
        subscriber_id: impl Into<SubscriberId>,
        destination_id: impl Into<DestinationId>,
        region: impl Into<Region>,
        threshold: u64,
        direction: Direction,
    ) -> Result<Self, DomainError> {
        if threshold == 0 {
            return Err(DomainError::NonPositiveThreshold);
        }
        Ok(Self {
            subscriber_id: subscriber_id.into(),
            destination_id: destination_id.into(),
            region: region.into(),
            threshold,
            direction,
        })
    }
}

/// A persisted alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: AlertId,
    pub subscriber_id: SubscriberId,
    pub destination_id: DestinationId,
    pub region: Region,
    pub threshold: u64,
    pub direction: Direction,
    pub created_at: DateTime<Utc>,
    /// Set once, never cleared.
    pub triggered: bool,
}

impl Alert {
    /// Materialise a new alert with its assigned id and creation time.
    #[must_use]
    pub fn from_new(id: AlertId, new: NewAlert, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            subscriber_id: new.subscriber_id,
            destination_id: new.destination_id,
            region: new.region,
            threshold: new.threshold,
            direction: new.direction,
            created_at,
            triggered: false,
        }
    }

    /// Whether the alert is still waiting for its condition.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.triggered
    }

    /// Whether `price` (in gold) meets this alert's condition.
    #[must_use]
    pub const fn is_met_by(&self, price: u64) -> bool {
        self.direction.is_met(price, self.threshold)
    }
}
