//! Per-key distributed mutex
//!
//! Built on the store's atomic set-if-absent with a short TTL, so a holder
//! that crashes before releasing cannot block other callers past the TTL.
//! Acquisition never waits; retry or give-up is the caller's decision.

use stampede_domain::error::Result;
use stampede_domain::ports::providers::CacheStore;
use stampede_domain::value_objects::CacheKeys;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Distributed lock manager over a [`CacheStore`]
#[derive(Clone)]
pub struct LockManager {
    store: Arc<dyn CacheStore>,
    keys: CacheKeys,
    ttl: Duration,
}

impl LockManager {
    /// Create a lock manager whose locks expire after `ttl`
    pub fn new(store: Arc<dyn CacheStore>, keys: CacheKeys, ttl: Duration) -> Self {
        Self { store, keys, ttl }
    }

    /// Lock TTL applied to every acquisition
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Lock key for an id
    pub fn lock_key<I: Display + ?Sized>(&self, id: &I) -> String {
        self.keys.lock_key(id)
    }

    /// Try to take the lock for `id` without waiting
    ///
    /// # Returns
    /// True if this call created the lock key
    pub async fn acquire<I: Display + ?Sized>(&self, id: &I) -> Result<bool> {
        let lock_key = self.lock_key(id);
        let acquired = self.store.try_acquire_lock(&lock_key, self.ttl).await?;
        debug!(lock_key = %lock_key, acquired, "Lock acquisition attempted");
        Ok(acquired)
    }

    /// Try to take the lock for `id`, returning a guard that owns the release
    pub async fn try_lock<I: Display + ?Sized>(&self, id: &I) -> Result<Option<LockGuard>> {
        if self.acquire(id).await? {
            Ok(Some(LockGuard {
                manager: self.clone(),
                lock_key: self.lock_key(id),
                released: false,
            }))
        } else {
            Ok(None)
        }
    }

    /// Release the lock for `id`
    ///
    /// A failed delete is logged and otherwise ignored: the lock expires on
    /// its own and the caller's result must not be replaced by it.
    pub async fn release<I: Display + ?Sized>(&self, id: &I) {
        self.release_key(&self.lock_key(id)).await;
    }

    async fn release_key(&self, lock_key: &str) {
        match self.store.release_lock(lock_key).await {
            Ok(()) => debug!(lock_key = %lock_key, "Lock released"),
            Err(e) => warn!(
                lock_key = %lock_key,
                error = %e,
                "Failed to release lock, it will expire after its TTL"
            ),
        }
    }
}

impl fmt::Debug for LockManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockManager")
            .field("store", &self.store.provider_name())
            .field("lock_prefix", &self.keys.lock_prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Held distributed lock
///
/// Call [`LockGuard::release`] on every normal exit path. If the guard is
/// dropped without it (panic, cancelled future, rejected rebuild task) the
/// release is spawned onto the current Tokio runtime instead.
#[must_use = "a lock guard must be released"]
pub struct LockGuard {
    manager: LockManager,
    lock_key: String,
    released: bool,
}

impl LockGuard {
    /// Key of the held lock
    pub fn lock_key(&self) -> &str {
        &self.lock_key
    }

    /// Release the lock and wait for the store to confirm
    pub async fn release(mut self) {
        self.released = true;
        self.manager.release_key(&self.lock_key).await;
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let manager = self.manager.clone();
        let lock_key = std::mem::take(&mut self.lock_key);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    manager.release_key(&lock_key).await;
                });
            }
            Err(_) => warn!(
                lock_key = %lock_key,
                "Lock guard dropped outside a runtime, lock will expire after its TTL"
            ),
        }
    }
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("lock_key", &self.lock_key)
            .field("released", &self.released)
            .finish()
    }
}
