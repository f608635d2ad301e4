//! Moka in-process store provider
//!
//! Concurrent in-memory store on `moka::future::Cache`. Every write carries
//! its own expiry; entries written without one stay until evicted for
//! capacity or deleted.
//!
//! ## Example
//!
//! ```ignore
//! use stampede_providers::cache::MokaCacheStore;
//!
//! let store = MokaCacheStore::with_capacity(10_000);
//! ```

use crate::constants::MOKA_DEFAULT_MAX_CAPACITY;
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use stampede_domain::constants::LOCK_MARKER;
use stampede_domain::error::Result;
use stampede_domain::ports::providers::CacheStore;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct StoredValue {
    payload: String,
    ttl: Option<Duration>,
}

impl StoredValue {
    fn expiring(payload: &str, ttl: Duration) -> Self {
        Self {
            payload: payload.to_string(),
            ttl: Some(ttl),
        }
    }

    fn persistent(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            ttl: None,
        }
    }
}

/// Expiry taken from the value on every create and overwrite
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Moka-based in-process store
///
/// Lock keys live in the same cache as data keys, so they only exclude
/// callers sharing this instance.
#[derive(Clone)]
pub struct MokaCacheStore {
    cache: Cache<String, StoredValue>,
    max_capacity: u64,
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheStore {
    /// Create a new Moka store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_MAX_CAPACITY)
    }

    /// Create a new Moka store holding at most `max_capacity` entries
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            max_capacity,
        }
    }

    /// Get the maximum number of entries
    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Number of live entries after pending maintenance has run
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await.map(|value| value.payload))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.cache
            .insert(key.to_string(), StoredValue::expiring(value, ttl))
            .await;
        Ok(())
    }

    async fn set_no_expiry(&self, key: &str, value: &str) -> Result<()> {
        self.cache
            .insert(key.to_string(), StoredValue::persistent(value))
            .await;
        Ok(())
    }

    async fn try_acquire_lock(&self, lock_key: &str, ttl: Duration) -> Result<bool> {
        let entry = self
            .cache
            .entry(lock_key.to_string())
            .or_insert(StoredValue::expiring(LOCK_MARKER, ttl))
            .await;
        Ok(entry.is_fresh())
    }

    async fn release_lock(&self, lock_key: &str) -> Result<()> {
        self.cache.invalidate(lock_key).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheStore")
            .field("max_capacity", &self.max_capacity)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use stampede_application::ports::registry::{STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry};

#[linkme::distributed_slice(STORE_PROVIDERS)]
static MOKA_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "moka",
    description: "Moka in-process store with per-entry TTL",
    factory: |config: &StoreProviderConfig| {
        let store = if let Some(max_capacity) = config.max_capacity {
            MokaCacheStore::with_capacity(max_capacity)
        } else {
            MokaCacheStore::new()
        };
        Ok(std::sync::Arc::new(store))
    },
};
