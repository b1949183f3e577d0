//! In-memory alert store for testing and ephemeral runs.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{Alert, AlertId, NewAlert, SubscriberId};
use crate::error::Result;
use crate::port::outbound::store::AlertStore;

#[derive(Debug, Default)]
struct Inner {
    last_sequence: u64,
    /// Kept in creation order.
    alerts: Vec<Alert>,
}

/// In-memory alert store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    inner: RwLock<Inner>,
}

impl MemoryAlertStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of alerts held, triggered or not.
    pub fn len(&self) -> usize {
        self.inner.read().alerts.len()
    }

    /// Whether the store holds no alerts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn create(&self, new: NewAlert) -> Result<Alert> {
        let mut inner = self.inner.write();
        inner.last_sequence += 1;
        let id = AlertId::compose(&new.subscriber_id, inner.last_sequence);
        let alert = Alert::from_new(id, new, Utc::now());
        inner.alerts.push(alert.clone());
        Ok(alert)
    }

    async fn list_active(&self, subscriber: &SubscriberId) -> Result<Vec<Alert>> {
        Ok(self
            .inner
            .read()
            .alerts
            .iter()
            .filter(|a| a.is_active() && &a.subscriber_id == subscriber)
            .cloned()
            .collect())
    }

    async fn list_all_active(&self) -> Result<Vec<Alert>> {
        Ok(self
            .inner
            .read()
            .alerts
            .iter()
            .filter(|a| a.is_active())
            .cloned()
            .collect())
    }

    async fn remove(&self, subscriber: &SubscriberId, id: &AlertId) -> Result<bool> {
        let mut inner = self.inner.write();
        let before = inner.alerts.len();
        inner
            .alerts
            .retain(|a| !(&a.id == id && &a.subscriber_id == subscriber));
        Ok(inner.alerts.len() < before)
    }

    async fn mark_triggered(&self, id: &AlertId) -> Result<()> {
        if let Some(alert) = self.inner.write().alerts.iter_mut().find(|a| &a.id == id) {
            alert.triggered = true;
        }
        Ok(())
    }

    async fn get(&self, id: &AlertId) -> Result<Option<Alert>> {
        Ok(self.inner.read().alerts.iter().find(|a| &a.id == id).cloned())
    }
}
