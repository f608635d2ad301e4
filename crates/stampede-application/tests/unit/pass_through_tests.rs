//! Pass-through reads with negative caching

use crate::support::{Shop, call_count, counting_loader, failing_loader, moka_client};
use stampede_domain::Error;
use stampede_domain::ports::providers::CacheStore;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_hit_skips_loader() {
    let (client, _store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let shop = Shop::new(1, "Tea House");
    client.set(&1, &shop, TTL).await.unwrap();

    let loaded = client
        .query_with_pass_through(1u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap();

    assert_eq!(loaded, Some(shop));
    assert_eq!(call_count(&calls), 0);
}

#[tokio::test]
async fn test_miss_loads_and_caches_value() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let shop = Shop::new(2, "Noodle Bar");

    let first = client
        .query_with_pass_through(2u64, counting_loader(&calls, Some(shop.clone()), Duration::ZERO), TTL)
        .await
        .unwrap();
    let second = client
        .query_with_pass_through(2u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap();

    assert_eq!(first, Some(shop.clone()));
    assert_eq!(second, Some(shop));
    assert_eq!(call_count(&calls), 1);
    assert!(store.get("cache:2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_absent_key_is_tombstoned_until_null_ttl_lapses() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));

    let first = client
        .query_with_pass_through(7u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap();
    assert_eq!(first, None);
    assert_eq!(call_count(&calls), 1);
    assert_eq!(store.get("cache:7").await.unwrap(), Some(String::new()));

    let second = client
        .query_with_pass_through(7u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap();
    assert_eq!(second, None);
    assert_eq!(call_count(&calls), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let third = client
        .query_with_pass_through(7u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap();
    assert_eq!(third, None);
    assert_eq!(call_count(&calls), 2);
}

#[tokio::test]
async fn test_loader_error_propagates_and_caches_nothing() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));

    let err = client
        .query_with_pass_through(3u64, failing_loader(&calls), TTL)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Loader { ref key, .. } if key == "cache:3"));
    assert!(err.to_string().contains("database unavailable"));
    assert!(store.get("cache:3").await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_entry_is_deserialization_error() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    store.set("cache:4", "{not json", TTL).await.unwrap();

    let err = client
        .query_with_pass_through(4u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }));
    assert_eq!(call_count(&calls), 0);
}

#[tokio::test]
async fn test_reads_are_counted() {
    let (client, _store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let shop = Shop::new(5, "Bakery");

    for _ in 0..2 {
        client
            .query_with_pass_through(5u64, counting_loader(&calls, Some(shop.clone()), Duration::ZERO), TTL)
            .await
            .unwrap();
        client
            .query_with_pass_through(6u64, counting_loader(&calls, None, Duration::ZERO), TTL)
            .await
            .unwrap();
    }

    let stats = client.stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.tombstone_hits, 1);
    assert_eq!(stats.loader_calls, 2);
    assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
}
