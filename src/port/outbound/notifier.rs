//! Notification port for triggered alerts.
//!
//! The engine hands a structured [`AlertNotification`] to a [`Dispatcher`]
//! and does not care how the message is rendered or transported.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{Alert, AlertId, DestinationId, Direction, PriceQuote, Region, SubscriberId};
use crate::error::Result;

/// Payload describing a triggered alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertNotification {
    pub alert_id: AlertId,
    pub subscriber_id: SubscriberId,
    pub region: Region,
    /// Observed price in gold.
    pub price: u64,
    pub threshold: u64,
    pub direction: Direction,
    pub last_updated: DateTime<Utc>,
}

impl AlertNotification {
    /// Build the notification for `alert` triggered by `quote`.
    #[must_use]
    pub fn new(alert: &Alert, quote: &PriceQuote) -> Self {
        Self {
            alert_id: alert.id.clone(),
            subscriber_id: alert.subscriber_id.clone(),
            region: alert.region.clone(),
            price: quote.price,
            threshold: alert.threshold,
            direction: alert.direction,
            last_updated: quote.last_updated,
        }
    }
}

/// Delivers notifications to destinations.
///
/// Delivery is best-effort: the scheduler logs failures and moves on.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `deliver` is awaited inside a scheduler tick, so it should not hang
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Deliver `notification` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error when the message could not be sent.
    async fn deliver(
        &self,
        destination: &DestinationId,
        notification: &AlertNotification,
    ) -> Result<()>;
}

/// A dispatcher that only logs notifications via tracing.
pub struct LogDispatcher;

#[async_trait]
impl Dispatcher for LogDispatcher {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(
        &self,
        destination: &DestinationId,
        notification: &AlertNotification,
    ) -> Result<()> {
        info!(
            destination = %destination,
            alert_id = %notification.alert_id,
            subscriber = %notification.subscriber_id,
            region = %notification.region,
            price = notification.price,
            threshold = notification.threshold,
            direction = %notification.direction,
            "Alert triggered"
        );
        Ok(())
    }
}
