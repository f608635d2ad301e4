//! Tests for the store provider registry
//!
//! `extern crate stampede_providers` in the suite root forces linkme
//! registration of the real providers.

use stampede_application::ports::registry::*;
use std::time::Duration;

#[test]
fn test_config_builder() {
    let config = StoreProviderConfig::new("redis")
        .with_uri("redis://cache.internal:6379")
        .with_max_capacity(500);

    assert_eq!(config.provider, "redis");
    assert_eq!(config.uri.as_deref(), Some("redis://cache.internal:6379"));
    assert_eq!(config.max_capacity, Some(500));

    let bare = StoreProviderConfig::new("null");
    assert!(bare.uri.is_none());
    assert!(bare.max_capacity.is_none());
}

#[test]
fn test_list_providers_includes_builtin_stores() {
    let providers = list_store_providers();

    for expected in ["moka", "null"] {
        assert!(
            providers.iter().any(|(name, _)| *name == expected),
            "{expected} store should be registered. Available: {providers:?}"
        );
    }
    assert!(providers.iter().all(|(_, description)| !description.is_empty()));
}

#[test]
fn test_resolve_unknown_provider_lists_available() {
    let err = resolve_store_provider(&StoreProviderConfig::new("memcached")).unwrap_err();

    assert!(err.contains("Unknown store provider 'memcached'"));
    assert!(err.contains("moka"));
}

#[tokio::test]
async fn test_resolved_moka_store_is_usable() {
    let store = resolve_store_provider(&StoreProviderConfig::new("moka").with_max_capacity(10))
        .expect("moka store should resolve");

    assert_eq!(store.provider_name(), "moka");
    store
        .set("cache:1", "\"value\"", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(
        store.get("cache:1").await.unwrap(),
        Some("\"value\"".to_string())
    );
}

#[tokio::test]
async fn test_resolved_null_store_stores_nothing() {
    let store = resolve_store_provider(&StoreProviderConfig::new("null"))
        .expect("null store should resolve");

    assert_eq!(store.provider_name(), "null");
    store.set_no_expiry("cache:1", "x").await.unwrap();
    assert!(store.get("cache:1").await.unwrap().is_none());
}
