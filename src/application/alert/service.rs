//! Alert management use cases.
//!
//! Wraps an [`AlertStore`] with the rules applied to subscriber requests:
//! region defaulting and allow-listing, and the configured threshold range.
//! The store itself accepts any positive threshold.

use std::sync::Arc;

use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::{Alert, AlertId, DestinationId, Direction, NewAlert, Region, SubscriberId};
use crate::error::Result;
use crate::infrastructure::config::alerts::AlertsConfig;
use crate::port::outbound::store::AlertStore;

/// A subscriber's request to create an alert.
#[derive(Debug, Clone)]
pub struct AlertRequest {
    pub subscriber: SubscriberId,
    pub destination: DestinationId,
    /// Threshold in gold.
    pub threshold: u64,
    pub direction: Direction,
    /// Falls back to the configured default region.
    pub region: Option<Region>,
}

/// Creates, lists and removes alerts on behalf of subscribers.
pub struct AlertService {
    store: Arc<dyn AlertStore>,
    rules: AlertsConfig,
}

impl AlertService {
    pub fn new(store: Arc<dyn AlertStore>, rules: AlertsConfig) -> Self {
        Self { store, rules }
    }

    /// Validate `request` and persist a new alert.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UnknownRegion`] if the region is not tracked
    /// - [`DomainError::ThresholdOutOfRange`] if the threshold is outside
    ///   `min_threshold..=max_threshold`
    /// - storage errors from the store
    pub async fn set(&self, request: AlertRequest) -> Result<Alert> {
        let region = request
            .region
            .unwrap_or_else(|| self.rules.default_region());
        if !self.rules.allows(&region) {
            return Err(DomainError::UnknownRegion {
                region: region.to_string(),
            }
            .into());
        }

        let (min, max) = (self.rules.min_threshold, self.rules.max_threshold);
        if !(min..=max).contains(&request.threshold) {
            return Err(DomainError::ThresholdOutOfRange {
                threshold: request.threshold,
                min,
                max,
            }
            .into());
        }

        let new = NewAlert::try_new(
            request.subscriber,
            request.destination,
            region,
            request.threshold,
            request.direction,
        )?;
        let alert = self.store.create(new).await?;

        info!(
            alert_id = %alert.id,
            subscriber_id = %alert.subscriber_id,
            region = %alert.region,
            threshold = alert.threshold,
            direction = %alert.direction,
            "Alert created"
        );
        Ok(alert)
    }

    /// Active alerts of `subscriber`, oldest first.
    pub async fn list(&self, subscriber: &SubscriberId) -> Result<Vec<Alert>> {
        self.store.list_active(subscriber).await
    }

    /// Remove `id` if it belongs to `subscriber`.
    pub async fn remove(&self, subscriber: &SubscriberId, id: &AlertId) -> Result<bool> {
        let removed = self.store.remove(subscriber, id).await?;
        if removed {
            info!(alert_id = %id, subscriber_id = %subscriber, "Alert removed");
        }
        Ok(removed)
    }

    /// Any alert by id, triggered or not.
    pub async fn show(&self, id: &AlertId) -> Result<Option<Alert>> {
        self.store.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryAlertStore;
    use crate::error::Error;

    fn service() -> AlertService {
        AlertService::new(Arc::new(MemoryAlertStore::new()), AlertsConfig::default())
    }

    fn request(threshold: u64, region: Option<&str>) -> AlertRequest {
        AlertRequest {
            subscriber: SubscriberId::new("u1"),
            destination: DestinationId::new("chan-1"),
            threshold,
            direction: Direction::Above,
            region: region.map(Region::new),
        }
    }

    #[tokio::test]
    async fn set_defaults_region_to_us() {
        let alert = service().set(request(250_000, None)).await.unwrap();
        assert_eq!(alert.region, Region::new("us"));
        assert_eq!(alert.id.as_str(), "u1-1");
    }

    #[tokio::test]
    async fn set_normalises_region_case() {
        let alert = service().set(request(250_000, Some("EU"))).await.unwrap();
        assert_eq!(alert.region.as_str(), "eu");
    }

    #[tokio::test]
    async fn set_rejects_untracked_region() {
        let err = service().set(request(250_000, Some("cn"))).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::UnknownRegion { ref region }) if region == "cn"
        ));
    }

    #[tokio::test]
    async fn set_enforces_threshold_range_inclusively() {
        let service = service();
        assert!(service.set(request(1_000, None)).await.is_ok());
        assert!(service.set(request(1_000_000, None)).await.is_ok());

        let err = service.set(request(999, None)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::ThresholdOutOfRange { threshold: 999, .. })
        ));
        assert!(service.set(request(1_000_001, None)).await.is_err());
    }

    #[tokio::test]
    async fn list_remove_show_flow() {
        let service = service();
        let alert = service.set(request(5_000, None)).await.unwrap();

        assert_eq!(service.list(&SubscriberId::new("u1")).await.unwrap().len(), 1);
        assert!(!service
            .remove(&SubscriberId::new("u2"), &alert.id)
            .await
            .unwrap());
        assert!(service.show(&alert.id).await.unwrap().is_some());

        assert!(service
            .remove(&SubscriberId::new("u1"), &alert.id)
            .await
            .unwrap());
        assert!(service.show(&alert.id).await.unwrap().is_none());
        assert!(service.list(&SubscriberId::new("u1")).await.unwrap().is_empty());
    }
}
