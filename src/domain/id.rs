//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Alert identifier of the form `{subscriber}-{sequence}`.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(String);

impl AlertId {
    /// Create an `AlertId` from an existing string (e.g. loaded from storage).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Compose the identifier for a subscriber's alert with the given sequence.
    #[must_use]
    pub fn compose(subscriber: &SubscriberId, sequence: u64) -> Self {
        Self(format!("{}-{}", subscriber.as_str(), sequence))
    }

    /// Trailing numeric sequence, if the id ends in `-<digits>`.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        let (_, suffix) = self.0.rsplit_once('-')?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }

    /// Get the alert ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AlertId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AlertId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Subscriber identifier - the user who owns an alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Create a new `SubscriberId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the subscriber ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubscriberId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SubscriberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Destination a notification is delivered to (a chat or channel id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationId(String);

impl DestinationId {
    /// Create a new `DestinationId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the destination ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DestinationId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DestinationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Upstream region (`us`, `eu`, `kr`, `tw`, ...), always lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region(String);

impl Region {
    /// Create a new `Region`, normalising to lower case.
    pub fn new(region: impl AsRef<str>) -> Self {
        Self(region.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Region {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
