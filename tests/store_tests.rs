mod harness;

use tokenwatch::domain::{AlertId, Direction, NewAlert, SubscriberId};
use tokenwatch::port::AlertStore;

fn new_alert(subscriber: &str, threshold: u64) -> NewAlert {
    NewAlert::try_new(subscriber, "chat-1", "us", threshold, Direction::Above).unwrap()
}

#[tokio::test]
async fn alerts_survive_reopen() {
    let db = harness::temp_db::TempDb::create("store-reopen");

    let created = {
        let store = db.store();
        store.create(new_alert("u1", 5_000)).await.unwrap()
    };

    let store = db.store();
    let loaded = store.get(&created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn ids_keep_increasing_after_restart() {
    let db = harness::temp_db::TempDb::create("store-sequence");

    {
        let store = db.store();
        for threshold in [1_000, 2_000, 3_000] {
            store.create(new_alert("u1", threshold)).await.unwrap();
        }
        store.create(new_alert("u2", 4_000)).await.unwrap();
    }

    let store = db.store();
    assert_eq!(store.last_sequence(), 4);
    let next = store.create(new_alert("u1", 5_000)).await.unwrap();
    assert_eq!(next.id.as_str(), "u1-5");
}

#[tokio::test]
async fn triggered_alerts_stay_retired_after_restart() {
    let db = harness::temp_db::TempDb::create("store-triggered");

    let id = {
        let store = db.store();
        let alert = store.create(new_alert("u1", 5_000)).await.unwrap();
        store.mark_triggered(&alert.id).await.unwrap();
        alert.id
    };

    let store = db.store();
    assert!(store.list_all_active().await.unwrap().is_empty());
    assert!(store.get(&id).await.unwrap().unwrap().triggered);
}

#[tokio::test]
async fn list_keeps_creation_order_past_nine() {
    let db = harness::temp_db::TempDb::create("store-order");
    let store = db.store();

    for threshold in 1..=11 {
        store.create(new_alert("u1", threshold * 1_000)).await.unwrap();
    }

    let ids: Vec<String> = store
        .list_active(&SubscriberId::new("u1"))
        .await
        .unwrap()
        .into_iter()
        .map(|alert| alert.id.to_string())
        .collect();
    assert_eq!(ids.first().map(String::as_str), Some("u1-1"));
    assert_eq!(ids.get(9).map(String::as_str), Some("u1-10"));
    assert_eq!(ids.last().map(String::as_str), Some("u1-11"));
}
