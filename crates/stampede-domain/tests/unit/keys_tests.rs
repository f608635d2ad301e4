//! Unit tests for key namespaces

use stampede_domain::CacheKeys;
use stampede_domain::constants::{DEFAULT_CACHE_PREFIX, DEFAULT_LOCK_PREFIX};

#[test]
fn test_default_namespaces() {
    let keys = CacheKeys::default();
    assert_eq!(keys.prefix, DEFAULT_CACHE_PREFIX);
    assert_eq!(keys.lock_prefix, DEFAULT_LOCK_PREFIX);
    assert!(keys.validate().is_ok());
}

#[test]
fn test_data_and_lock_keys_are_distinct() {
    let keys = CacheKeys::new("cache:shop:", "lock:shop:").unwrap();
    assert_eq!(keys.data_key(&42), "cache:shop:42");
    assert_eq!(keys.lock_key(&42), "lock:shop:42");
    assert_eq!(keys.data_key("abc"), "cache:shop:abc");
}

#[test]
fn test_colliding_prefixes_rejected() {
    assert!(CacheKeys::new("same:", "same:").is_err());
}

#[test]
fn test_nested_prefixes_rejected() {
    // The lock key for id 1 would equal the data key for id "lock:1"
    assert!(CacheKeys::new("cache:", "cache:lock:").is_err());
    assert!(CacheKeys::new("lock:cache:", "lock:").is_err());

    let keys = CacheKeys {
        prefix: "cache:".to_string(),
        lock_prefix: "cache:lock:".to_string(),
    };
    assert!(keys.validate().is_err());
}

#[test]
fn test_empty_prefix_overlaps_everything() {
    assert!(CacheKeys::new("", "lock:").is_err());
    assert!(CacheKeys::new("cache:", "").is_err());
}

#[test]
fn test_sibling_prefixes_accepted() {
    let keys = CacheKeys::new("shop:", "shop-lock:").unwrap();
    assert_ne!(keys.data_key("lock:1"), keys.lock_key(&1));
}
