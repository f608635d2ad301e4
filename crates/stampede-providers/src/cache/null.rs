//! Null store provider
//!
//! A store that doesn't keep anything. Every read misses, so every read
//! goes to the loader.

use async_trait::async_trait;
use stampede_domain::error::Result;
use stampede_domain::ports::providers::CacheStore;
use std::time::Duration;

/// Null store that doesn't store anything
///
/// Lock acquisition always succeeds, so the mutex strategy never waits.
///
/// # Example
///
/// ```rust
/// use stampede_providers::cache::NullCacheStore;
///
/// let store = NullCacheStore::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheStore;

impl NullCacheStore {
    /// Create a new null store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn set_no_expiry(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    async fn try_acquire_lock(&self, _lock_key: &str, _ttl: Duration) -> Result<bool> {
        Ok(true)
    }

    async fn release_lock(&self, _lock_key: &str) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use stampede_application::ports::registry::{STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry};

#[linkme::distributed_slice(STORE_PROVIDERS)]
static NULL_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "null",
    description: "No-op store that disables caching",
    factory: |_config: &StoreProviderConfig| Ok(std::sync::Arc::new(NullCacheStore::new())),
};
