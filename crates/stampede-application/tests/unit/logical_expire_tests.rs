//! Logical-expiration reads with background rebuild

use crate::support::{
    Shop, call_count, counting_loader, failing_loader, moka_client, next_event, test_config,
};
use chrono::Utc;
use stampede_application::{
    CacheClient, JsonCodec, RebuildEvent, RebuildScheduler, RebuildTask, SchedulerConfig,
};
use stampede_domain::ports::providers::CacheStore;
use stampede_providers::cache::MokaCacheStore;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::{Duration, Instant};

const LOGICAL_TTL: Duration = Duration::from_secs(60);

/// Warm `id` with an entry that is already logically expired
async fn warm_stale(client: &stampede_application::CacheClient, id: u64, shop: &Shop) {
    client
        .set_with_logical_expire(&id, shop, Duration::from_millis(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn test_missing_entry_is_not_loaded() {
    let (client, _store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));

    let loaded = client
        .query_with_logical_expire(1u64, counting_loader(&calls, Some(Shop::new(1, "x")), Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();

    assert_eq!(loaded, None);
    assert_eq!(call_count(&calls), 0);
}

#[tokio::test]
async fn test_fresh_entry_returned_without_loader() {
    let (client, _store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let shop = Shop::new(2, "Dumplings");
    client
        .set_with_logical_expire(&2, &shop, LOGICAL_TTL)
        .await
        .unwrap();

    let loaded = client
        .query_with_logical_expire(2u64, counting_loader(&calls, None, Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();

    assert_eq!(loaded, Some(shop));
    assert_eq!(call_count(&calls), 0);
    assert_eq!(client.stats().hits, 1);
}

#[tokio::test]
async fn test_logical_entry_has_no_physical_ttl() {
    let (client, store) = moka_client();
    let shop = Shop::new(3, "Sushi");
    warm_stale(&client, 3, &shop).await;

    let payload = store.get("cache:3").await.unwrap().expect("entry must stay in the store");
    let entry = JsonCodec.unwrap_logical::<Shop>(&payload).unwrap();
    assert_eq!(entry.data, shop);
    assert!(entry.is_expired());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stale_read_returns_old_value_then_refreshes() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let old = Shop::new(4, "Old Name");
    let new = Shop::new(4, "New Name");
    warm_stale(&client, 4, &old).await;
    let mut events = client.subscribe_rebuilds();

    let started = Instant::now();
    let stale = client
        .query_with_logical_expire(4u64, counting_loader(&calls, Some(new.clone()), Duration::from_millis(300)), LOGICAL_TTL)
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(300));
    assert_eq!(stale, Some(old.clone()));

    let during = client
        .query_with_logical_expire(4u64, counting_loader(&calls, Some(new.clone()), Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();
    assert_eq!(during, Some(old));

    assert_eq!(
        next_event(&mut events).await,
        RebuildEvent::Completed {
            key: "cache:4".to_string()
        }
    );

    let refreshed = client
        .query_with_logical_expire(4u64, counting_loader(&calls, None, Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();
    assert_eq!(refreshed, Some(new));
    assert_eq!(call_count(&calls), 1);

    let payload = store.get("cache:4").await.unwrap().unwrap();
    let entry = JsonCodec.unwrap_logical::<Shop>(&payload).unwrap();
    assert!(entry.expire_time > Utc::now());
    assert!(store.get("lock:4").await.unwrap().is_none());

    let stats = client.stats();
    assert_eq!(stats.stale_reads, 2);
    assert_eq!(stats.rebuilds_scheduled, 1);
    assert_eq!(stats.lock_contentions, 1);
}

#[tokio::test]
async fn test_failed_rebuild_releases_lock_and_keeps_stale_entry() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let old = Shop::new(5, "Stale");
    warm_stale(&client, 5, &old).await;
    let mut events = client.subscribe_rebuilds();

    let stale = client
        .query_with_logical_expire(5u64, failing_loader(&calls), LOGICAL_TTL)
        .await
        .unwrap();
    assert_eq!(stale, Some(old.clone()));

    match next_event(&mut events).await {
        RebuildEvent::Failed { key, reason } => {
            assert_eq!(key, "cache:5");
            assert!(reason.contains("database unavailable"), "{reason}");
        }
        other => panic!("expected a failed rebuild, got {other:?}"),
    }
    assert!(store.get("lock:5").await.unwrap().is_none());

    let again = client
        .query_with_logical_expire(5u64, failing_loader(&calls), LOGICAL_TTL)
        .await
        .unwrap();
    assert_eq!(again, Some(old));
    next_event(&mut events).await;
    assert_eq!(call_count(&calls), 2);
}

#[tokio::test]
async fn test_rebuild_without_source_value_keeps_stale_entry() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let old = Shop::new(6, "Closed Shop");
    warm_stale(&client, 6, &old).await;
    let mut events = client.subscribe_rebuilds();

    client
        .query_with_logical_expire(6u64, counting_loader(&calls, None, Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();

    match next_event(&mut events).await {
        RebuildEvent::Failed { reason, .. } => assert!(reason.contains("no value"), "{reason}"),
        other => panic!("expected a failed rebuild, got {other:?}"),
    }
    let payload = store.get("cache:6").await.unwrap().unwrap();
    assert_eq!(JsonCodec.unwrap_logical::<Shop>(&payload).unwrap().data, old);
    assert!(store.get("lock:6").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_rebuild_still_serves_stale_and_frees_lock() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let old = Shop::new(7, "Stale");
    warm_stale(&client, 7, &old).await;
    client.scheduler().shutdown().await;

    let stale = client
        .query_with_logical_expire(7u64, counting_loader(&calls, Some(Shop::new(7, "New")), Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();
    assert_eq!(stale, Some(old));
    assert_eq!(client.stats().rebuilds_rejected, 1);
    assert_eq!(call_count(&calls), 0);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.get("lock:7").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_saturated_scheduler_serves_stale_and_frees_lock() {
    let store = Arc::new(MokaCacheStore::new());
    let scheduler = RebuildScheduler::new(SchedulerConfig {
        workers: 1,
        queue_capacity: 1,
    })
    .unwrap();
    let client = CacheClient::new(store.clone(), scheduler, test_config()).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let old = Shop::new(9, "Stale");
    warm_stale(&client, 9, &old).await;

    // Occupy the only worker, then the only queue slot
    let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
    let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
    client
        .scheduler()
        .submit(RebuildTask::new("cache:busy", async move {
            let _ = started_tx.send(());
            let _ = release_rx.await;
            Ok(())
        }))
        .unwrap();
    started_rx.await.unwrap();
    client
        .scheduler()
        .submit(RebuildTask::new("cache:queued", async { Ok(()) }))
        .unwrap();
    assert_eq!(client.scheduler().queued(), 1);

    let stale = client
        .query_with_logical_expire(9u64, counting_loader(&calls, Some(Shop::new(9, "New")), Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();
    assert_eq!(stale, Some(old));

    let stats = client.stats();
    assert_eq!(stats.rebuilds_rejected, 1);
    assert_eq!(stats.rebuilds_scheduled, 0);
    assert_eq!(stats.stale_reads, 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(store.get("lock:9").await.unwrap().is_none());
    assert_eq!(call_count(&calls), 0);

    release_tx.send(()).unwrap();
    client.scheduler().shutdown().await;
}

#[tokio::test]
async fn test_tombstone_reads_as_missing() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    store
        .set("cache:8", "", Duration::from_secs(60))
        .await
        .unwrap();

    let loaded = client
        .query_with_logical_expire(8u64, counting_loader(&calls, None, Duration::ZERO), LOGICAL_TTL)
        .await
        .unwrap();

    assert_eq!(loaded, None);
    assert_eq!(call_count(&calls), 0);
}
