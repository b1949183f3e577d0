//! Persistence port for alerts.

use async_trait::async_trait;

use crate::domain::{Alert, AlertId, NewAlert, SubscriberId};
use crate::error::Result;

/// Durable keyed storage of alerts.
///
/// Implementations own the alert sequence counter. Ids are allocated with an
/// atomic read-then-increment and never reused, including across restarts.
///
/// # Errors
///
/// Every method returns storage-layer failures to the caller; nothing is
/// swallowed.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Allocate the next id, persist the alert and return the full record.
    async fn create(&self, alert: NewAlert) -> Result<Alert>;

    /// Untriggered alerts owned by `subscriber`, in creation order.
    async fn list_active(&self, subscriber: &SubscriberId) -> Result<Vec<Alert>>;

    /// Untriggered alerts across all subscribers, in creation order.
    async fn list_all_active(&self) -> Result<Vec<Alert>>;

    /// Delete `id` if it belongs to `subscriber`. Returns whether a row was removed.
    async fn remove(&self, subscriber: &SubscriberId, id: &AlertId) -> Result<bool>;

    /// Mark an alert as triggered. Idempotent.
    async fn mark_triggered(&self, id: &AlertId) -> Result<()>;

    /// Fetch an alert by id regardless of its triggered state.
    async fn get(&self, id: &AlertId) -> Result<Option<Alert>>;
}
