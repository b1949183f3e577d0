mod harness;

use std::sync::Arc;

use tokenwatch::application::alert::{AlertRequest, AlertService};
use tokenwatch::domain::{DestinationId, Direction, Region, SubscriberId};
use tokenwatch::infrastructure::config::alerts::AlertsConfig;
use tokenwatch::port::AlertStore;

fn above(subscriber: &str, threshold: u64) -> AlertRequest {
    AlertRequest {
        subscriber: SubscriberId::new(subscriber),
        destination: DestinationId::new("1001"),
        threshold,
        direction: Direction::Above,
        region: None,
    }
}

#[tokio::test]
async fn e2e_register_poll_trigger_retire() {
    let db = harness::temp_db::TempDb::create("e2e-flow");
    let store: Arc<dyn AlertStore> = Arc::new(db.store());
    let service = AlertService::new(Arc::clone(&store), AlertsConfig::default());
    let pipeline = harness::pipeline::Pipeline::new(Arc::clone(&store));

    let alert = service.set(above("u1", 5_000)).await.unwrap();
    assert_eq!(alert.id.as_str(), "u1-1");
    assert_eq!(alert.region, Region::new("us"));

    pipeline.prices.set_gold("us", 4_990);
    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.triggered, 0);
    assert!(pipeline.dispatcher.is_empty());
    assert_eq!(service.list(&SubscriberId::new("u1")).await.unwrap().len(), 1);

    pipeline.prices.set_gold("us", 5_000);
    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.triggered, 1);
    assert_eq!(report.delivered, 1);

    let deliveries = pipeline.dispatcher.deliveries();
    assert_eq!(deliveries.len(), 1);
    let (destination, notification) = &deliveries[0];
    assert_eq!(destination.as_str(), "1001");
    assert_eq!(notification.alert_id, alert.id);
    assert_eq!(notification.price, 5_000);
    assert_eq!(notification.threshold, 5_000);

    let stored = service.show(&alert.id).await.unwrap().unwrap();
    assert!(stored.triggered);
    assert!(service.list(&SubscriberId::new("u1")).await.unwrap().is_empty());

    pipeline.prices.set_gold("us", 9_000);
    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.alerts_checked, 0);
    assert_eq!(pipeline.dispatcher.len(), 1);
}

#[tokio::test]
async fn e2e_one_token_serves_many_ticks() {
    let db = harness::temp_db::TempDb::create("e2e-token");
    let store: Arc<dyn AlertStore> = Arc::new(db.store());
    let service = AlertService::new(Arc::clone(&store), AlertsConfig::default());
    let pipeline = harness::pipeline::Pipeline::new(Arc::clone(&store));

    service.set(above("u1", 900_000)).await.unwrap();
    pipeline.prices.set_gold("us", 250_000);

    for _ in 0..3 {
        pipeline.scheduler.tick().await.unwrap();
    }

    assert_eq!(pipeline.exchange.calls(), 1);
    assert_eq!(pipeline.prices.calls(), 3);
    assert!(pipeline
        .prices
        .tokens_seen()
        .iter()
        .all(|token| token == "token-us-1"));
}

#[tokio::test]
async fn e2e_rejected_alert_is_never_polled() {
    let db = harness::temp_db::TempDb::create("e2e-reject");
    let store: Arc<dyn AlertStore> = Arc::new(db.store());
    let service = AlertService::new(Arc::clone(&store), AlertsConfig::default());
    let pipeline = harness::pipeline::Pipeline::new(Arc::clone(&store));

    assert!(service.set(above("u1", 10)).await.is_err());

    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.alerts_checked, 0);
    assert_eq!(pipeline.prices.calls(), 0);
}
