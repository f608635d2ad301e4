//! Lock manager tests against the Moka store

use stampede_application::LockManager;
use stampede_domain::CacheKeys;
use stampede_domain::ports::providers::CacheStore;
use stampede_providers::cache::MokaCacheStore;
use std::sync::Arc;
use std::time::Duration;

fn lock_manager(ttl: Duration) -> (LockManager, Arc<MokaCacheStore>) {
    let store = Arc::new(MokaCacheStore::new());
    let locks = LockManager::new(store.clone(), CacheKeys::default(), ttl);
    (locks, store)
}

#[tokio::test]
async fn test_acquire_is_exclusive_and_non_blocking() {
    let (locks, _store) = lock_manager(Duration::from_secs(10));

    assert!(locks.acquire(&42).await.unwrap());
    assert!(!locks.acquire(&42).await.unwrap());
    assert!(locks.acquire(&43).await.unwrap());

    locks.release(&42).await;
    assert!(locks.acquire(&42).await.unwrap());
}

#[tokio::test]
async fn test_lock_key_uses_lock_namespace() {
    let (locks, store) = lock_manager(Duration::from_secs(10));

    assert_eq!(locks.lock_key(&7), "lock:7");
    assert!(locks.acquire(&7).await.unwrap());
    assert_eq!(store.get("lock:7").await.unwrap(), Some("1".to_string()));
    assert!(store.get("cache:7").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lock_self_expires() {
    let (locks, _store) = lock_manager(Duration::from_millis(100));

    assert!(locks.acquire(&1).await.unwrap());
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(locks.acquire(&1).await.unwrap());
}

#[tokio::test]
async fn test_guard_release_frees_lock() {
    let (locks, _store) = lock_manager(Duration::from_secs(10));

    let guard = locks.try_lock(&5).await.unwrap().expect("lock should be free");
    assert_eq!(guard.lock_key(), "lock:5");
    assert!(locks.try_lock(&5).await.unwrap().is_none());

    guard.release().await;
    assert!(locks.acquire(&5).await.unwrap());
}

#[tokio::test]
async fn test_dropped_guard_releases_in_background() {
    let (locks, store) = lock_manager(Duration::from_secs(10));

    let guard = locks.try_lock(&6).await.unwrap().expect("lock should be free");
    drop(guard);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(store.get("lock:6").await.unwrap().is_none());
}
