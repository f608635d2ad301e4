//! Mutex-protected reads

use crate::support::{
    Shop, call_count, counting_loader, failing_loader, moka_client, moka_client_with, test_config,
};
use stampede_application::{CacheClientConfig, RetryPolicy};
use stampede_domain::Error;
use stampede_domain::ports::providers::CacheStore;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_invoke_loader_once() {
    let (client, _store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let shop = Shop::new(1, "Hot Pot");

    let readers = (0..16).map(|_| {
        let client = client.clone();
        let loader = counting_loader(&calls, Some(shop.clone()), Duration::from_millis(100));
        tokio::spawn(async move { client.query_with_mutex(1u64, loader, TTL).await })
    });
    let results = futures::future::join_all(readers).await;

    for result in results {
        assert_eq!(result.unwrap().unwrap(), Some(shop.clone()));
    }
    assert_eq!(call_count(&calls), 1);
    assert!(client.stats().lock_contentions > 0);
}

#[tokio::test]
async fn test_lock_released_after_success() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));

    let loaded = client
        .query_with_mutex(2u64, counting_loader(&calls, Some(Shop::new(2, "Cafe")), Duration::ZERO), TTL)
        .await
        .unwrap();

    assert!(loaded.is_some());
    assert!(store.get("lock:2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lock_released_after_loader_failure() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));

    let err = client
        .query_with_mutex(3u64, failing_loader(&calls), TTL)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Loader { .. }));
    assert!(store.get("lock:3").await.unwrap().is_none());

    let loaded = client
        .query_with_mutex(3u64, counting_loader(&calls, Some(Shop::new(3, "Diner")), Duration::ZERO), TTL)
        .await
        .unwrap();
    assert_eq!(loaded, Some(Shop::new(3, "Diner")));
    assert_eq!(call_count(&calls), 2);
}

#[tokio::test]
async fn test_absent_key_is_tombstoned() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let loaded = client
            .query_with_mutex(4u64, counting_loader(&calls, None, Duration::ZERO), TTL)
            .await
            .unwrap();
        assert_eq!(loaded, None);
    }

    assert_eq!(call_count(&calls), 1);
    assert_eq!(store.get("cache:4").await.unwrap(), Some(String::new()));
    assert!(store.get("lock:4").await.unwrap().is_none());
}

#[tokio::test]
async fn test_contended_lock_times_out() {
    let (client, store) = moka_client_with(CacheClientConfig {
        retry: RetryPolicy::fixed(Duration::from_millis(10), 3),
        ..test_config()
    });
    let calls = Arc::new(AtomicUsize::new(0));
    store
        .try_acquire_lock("lock:5", Duration::from_secs(10))
        .await
        .unwrap();

    let err = client
        .query_with_mutex(5u64, counting_loader(&calls, None, Duration::ZERO), TTL)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::LockTimeout { ref key, attempts: 3 } if key == "cache:5"));
    assert_eq!(call_count(&calls), 0);
    assert_eq!(client.stats().lock_contentions, 3);
}

#[tokio::test]
async fn test_waiter_picks_up_value_stored_by_lock_holder() {
    let (client, store) = moka_client();
    let calls = Arc::new(AtomicUsize::new(0));
    let shop = Shop::new(6, "Ramen");
    store
        .try_acquire_lock("lock:6", Duration::from_secs(10))
        .await
        .unwrap();

    let holder = async {
        tokio::time::sleep(Duration::from_millis(60)).await;
        client.set(&6, &shop, TTL).await.unwrap();
        store.release_lock("lock:6").await.unwrap();
    };
    let (loaded, ()) = tokio::join!(
        client.query_with_mutex(6u64, counting_loader(&calls, None, Duration::ZERO), TTL),
        holder
    );

    assert_eq!(loaded.unwrap(), Some(shop));
    assert_eq!(call_count(&calls), 0);
}

#[tokio::test]
async fn test_cancellation_interrupts_backoff() {
    let (client, store) = moka_client_with(CacheClientConfig {
        retry: RetryPolicy::fixed(Duration::from_secs(5), 10),
        ..test_config()
    });
    let calls = Arc::new(AtomicUsize::new(0));
    store
        .try_acquire_lock("lock:7", Duration::from_secs(10))
        .await
        .unwrap();

    let token = client.cancellation_token();
    let started = tokio::time::Instant::now();
    let (result, ()) = tokio::join!(
        client.query_with_mutex(7u64, counting_loader(&calls, None, Duration::ZERO), TTL),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        }
    );

    assert!(matches!(result, Err(Error::Cancelled { ref key }) if key == "cache:7"));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(call_count(&calls), 0);
}
