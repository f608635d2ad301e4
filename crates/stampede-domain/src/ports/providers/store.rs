//! Cache Store Port
//!
//! Port for the fast key-value store sitting in front of the authoritative
//! source. Any store offering plain get/set/delete plus an atomic
//! conditional set-if-absent with TTL satisfies it.
//!
//! ## Contract
//!
//! - Payloads are opaque strings; the codec decides their shape.
//! - `try_acquire_lock` is a single atomic conditional write. Two callers can
//!   never both observe success for the same key inside one TTL window.
//! - `release_lock` is an idempotent delete.
//! - Backend failures are returned as [`Error::Store`](crate::Error::Store)
//!   and never retried or masked by the store itself.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Key-value store port used as cache
///
/// # Example
///
/// ```ignore
/// use stampede_domain::ports::providers::CacheStore;
/// use std::time::Duration;
///
/// store.set("cache:42", "{\"id\":42}", Duration::from_secs(300)).await?;
/// if store.try_acquire_lock("lock:42", Duration::from_secs(10)).await? {
///     // critical section
///     store.release_lock("lock:42").await?;
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Read the raw payload stored under `key`
    ///
    /// # Returns
    /// `None` when the key is absent or its physical TTL has lapsed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Store `value` under `key` with no physical expiry
    async fn set_no_expiry(&self, key: &str, value: &str) -> Result<()>;

    /// Atomically create `lock_key` with a TTL if it does not exist yet
    ///
    /// # Returns
    /// True only for the caller whose write created the key
    async fn try_acquire_lock(&self, lock_key: &str, ttl: Duration) -> Result<bool>;

    /// Delete `lock_key`; succeeds whether or not the lock is still held
    async fn release_lock(&self, lock_key: &str) -> Result<()>;

    /// Delete a data key
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Get the name/identifier of this store implementation
    ///
    /// # Returns
    /// A string identifier for the store (e.g., "moka", "redis", "null")
    fn provider_name(&self) -> &str;
}
