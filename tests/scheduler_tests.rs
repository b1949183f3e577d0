mod harness;

use std::sync::Arc;

use tokenwatch::adapter::outbound::memory::MemoryAlertStore;
use tokenwatch::domain::{Direction, NewAlert, Region};
use tokenwatch::port::AlertStore;
use tokenwatch::testkit::dispatcher::RecordingDispatcher;

use harness::pipeline::Pipeline;

async fn seed(
    store: &MemoryAlertStore,
    subscriber: &str,
    region: &str,
    threshold: u64,
    direction: Direction,
) {
    let alert = NewAlert::try_new(
        subscriber,
        format!("chat-{subscriber}"),
        region,
        threshold,
        direction,
    )
    .unwrap();
    store.create(alert).await.unwrap();
}

#[tokio::test]
async fn one_fetch_per_region_regardless_of_subscribers() {
    let store = Arc::new(MemoryAlertStore::new());
    seed(&store, "u1", "us", 5_000, Direction::Above).await;
    seed(&store, "u2", "us", 9_000, Direction::Below).await;
    seed(&store, "u3", "eu", 7_000, Direction::Above).await;
    seed(&store, "u3", "eu", 1_000, Direction::Below).await;

    let pipeline = Pipeline::new(store.clone());
    pipeline.prices.set_gold("us", 6_000);
    pipeline.prices.set_gold("eu", 6_000);

    let report = pipeline.scheduler.tick().await.unwrap();

    assert_eq!(report.alerts_checked, 4);
    assert_eq!(report.regions_polled, 2);
    assert_eq!(pipeline.prices.calls(), 2);
    assert_eq!(pipeline.exchange.calls(), 2);
    assert_eq!(
        pipeline.prices.queried(),
        vec![Region::new("eu"), Region::new("us")]
    );
    // us: 6000 >= 5000 and 6000 <= 9000; eu: neither.
    assert_eq!(report.triggered, 2);
    assert_eq!(store.list_all_active().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failing_region_does_not_block_others() {
    let store = Arc::new(MemoryAlertStore::new());
    seed(&store, "u1", "us", 5_000, Direction::Above).await;
    seed(&store, "u2", "eu", 5_000, Direction::Above).await;

    let pipeline = Pipeline::new(store.clone());
    pipeline.prices.set_gold("us", 8_000);
    pipeline.prices.fail_region("eu", 503);

    let report = pipeline.scheduler.tick().await.unwrap();

    assert_eq!(report.regions_failed, 1);
    assert_eq!(report.triggered, 1);
    let active = store.list_all_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].region, Region::new("eu"));

    // The failed region is evaluated again once it recovers.
    pipeline.prices.set_gold("eu", 8_000);
    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.triggered, 1);
    assert!(store.list_all_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn credential_failure_is_scoped_to_its_region() {
    let store = Arc::new(MemoryAlertStore::new());
    seed(&store, "u1", "us", 5_000, Direction::Above).await;
    seed(&store, "u2", "kr", 5_000, Direction::Above).await;

    let pipeline = Pipeline::new(store.clone());
    pipeline.prices.set_gold("us", 8_000);
    pipeline.prices.set_gold("kr", 8_000);
    pipeline.exchange.fail_region("kr", 401);

    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.regions_failed, 1);
    assert_eq!(report.triggered, 1);
    assert_eq!(pipeline.prices.queried(), vec![Region::new("us")]);

    pipeline.exchange.recover_region("kr");
    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.triggered, 1);
}

#[tokio::test]
async fn failed_delivery_still_retires_alert() {
    let store = Arc::new(MemoryAlertStore::new());
    seed(&store, "u1", "us", 5_000, Direction::Below).await;

    let pipeline = Pipeline::with_dispatcher(store.clone(), RecordingDispatcher::failing());
    pipeline.prices.set_gold("us", 4_000);

    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.triggered, 1);
    assert_eq!(report.delivered, 0);
    assert_eq!(report.delivery_failures, 1);
    assert_eq!(pipeline.dispatcher.len(), 1);
    assert!(store.list_all_active().await.unwrap().is_empty());

    pipeline.scheduler.tick().await.unwrap();
    assert_eq!(pipeline.dispatcher.len(), 1);
}

#[tokio::test]
async fn both_directions_trigger_at_exact_threshold() {
    let store = Arc::new(MemoryAlertStore::new());
    seed(&store, "u1", "us", 5_000, Direction::Above).await;
    seed(&store, "u2", "us", 5_000, Direction::Below).await;

    let pipeline = Pipeline::new(store.clone());
    pipeline.prices.set_copper("us", 50_009_999);

    let report = pipeline.scheduler.tick().await.unwrap();
    assert_eq!(report.triggered, 2);
    assert!(pipeline
        .dispatcher
        .deliveries()
        .iter()
        .all(|(_, notification)| notification.price == 5_000));
}
