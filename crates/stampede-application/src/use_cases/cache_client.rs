//! Cache Client Use Case
//!
//! Cache-aside reads over a [`CacheStore`] in three flavours:
//!
//! - [`CacheClient::query_with_pass_through`]: negative caching against
//!   penetration. A missing key is remembered as a tombstone for a short TTL.
//! - [`CacheClient::query_with_mutex`]: a per-key distributed lock so only
//!   one caller rebuilds an expired hot key while the others back off.
//! - [`CacheClient::query_with_logical_expire`]: entries carry their own
//!   expiry and never leave the store; a stale read triggers a background
//!   rebuild and returns the old payload immediately.
//!
//! Loaders are `FnOnce(id) -> Future<Output = Result<Option<V>, E>>`. A
//! `None` means the source has no record for the id.

use crate::codec::JsonCodec;
use crate::lock::{LockGuard, LockManager};
use crate::scheduler::{RebuildEvent, RebuildScheduler, RebuildTask};
use crate::use_cases::retry::RetryPolicy;
use crate::use_cases::stats::{ClientStats, StatsRecorder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stampede_domain::constants::{DEFAULT_LOCK_TTL_SECS, DEFAULT_NULL_TTL_SECS, TOMBSTONE};
use stampede_domain::error::{Error, Result};
use stampede_domain::ports::providers::CacheStore;
use stampede_domain::value_objects::{CacheKeys, CacheLookup};
use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Client-wide settings shared by every read strategy
#[derive(Debug, Clone, PartialEq)]
pub struct CacheClientConfig {
    /// Data and lock key namespaces
    pub keys: CacheKeys,
    /// Physical TTL of negative-cache tombstones
    pub null_ttl: Duration,
    /// TTL of per-key rebuild locks
    pub lock_ttl: Duration,
    /// Backoff applied by the mutex strategy while a lock is contended
    pub retry: RetryPolicy,
}

impl CacheClientConfig {
    /// Check the settings before building a client
    pub fn validate(&self) -> Result<()> {
        self.keys.validate()?;
        if self.null_ttl.is_zero() {
            return Err(Error::invalid_argument("Tombstone TTL must be positive"));
        }
        if self.lock_ttl.is_zero() {
            return Err(Error::invalid_argument("Lock TTL must be positive"));
        }
        self.retry.validate()
    }
}

impl Default for CacheClientConfig {
    fn default() -> Self {
        Self {
            keys: CacheKeys::default(),
            null_ttl: Duration::from_secs(DEFAULT_NULL_TTL_SECS),
            lock_ttl: Duration::from_secs(DEFAULT_LOCK_TTL_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

/// Cache-aside client
///
/// Cheap to clone; clones share the store, the rebuild scheduler, the
/// statistics and the cancellation token.
///
/// # Example
///
/// ```ignore
/// let client = CacheClient::new(store, scheduler, CacheClientConfig::default())?;
///
/// let shop: Option<Shop> = client
///     .query_with_mutex(42, |id| repo.find_shop(id), Duration::from_secs(1800))
///     .await?;
/// ```
#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn CacheStore>,
    codec: JsonCodec,
    locks: LockManager,
    scheduler: RebuildScheduler,
    config: CacheClientConfig,
    stats: Arc<StatsRecorder>,
    cancel: CancellationToken,
}

impl CacheClient {
    /// Create a client over `store`, running logical rebuilds on `scheduler`
    pub fn new(
        store: Arc<dyn CacheStore>,
        scheduler: RebuildScheduler,
        config: CacheClientConfig,
    ) -> Result<Self> {
        config.validate()?;
        let locks = LockManager::new(Arc::clone(&store), config.keys.clone(), config.lock_ttl);
        Ok(Self {
            store,
            codec: JsonCodec,
            locks,
            scheduler,
            config,
            stats: Arc::new(StatsRecorder::default()),
            cancel: CancellationToken::new(),
        })
    }

    /// Client settings
    pub fn config(&self) -> &CacheClientConfig {
        &self.config
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Lock manager guarding rebuilds
    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    /// Scheduler running logical-expiration rebuilds
    pub fn scheduler(&self) -> &RebuildScheduler {
        &self.scheduler
    }

    /// Token that interrupts pending mutex backoff waits when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Snapshot of the read-path counters
    pub fn stats(&self) -> ClientStats {
        self.stats.snapshot()
    }

    /// Receive outcomes of background rebuilds
    pub fn subscribe_rebuilds(&self) -> broadcast::Receiver<RebuildEvent> {
        self.scheduler.subscribe()
    }

    /// Cancel pending waits and drain the rebuild scheduler
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.scheduler.shutdown().await;
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Store `value` under `id` with a physical TTL
    pub async fn set<I, V>(&self, id: &I, value: &V, ttl: Duration) -> Result<()>
    where
        I: Display + ?Sized,
        V: Serialize + ?Sized,
    {
        let key = self.config.keys.data_key(id);
        let payload = self.codec.encode(value)?;
        self.store.set(&key, &payload, ttl).await
    }

    /// Store `value` under `id` with a logical expiry of `now + logical_ttl`
    ///
    /// The entry has no physical TTL. Use this to warm keys read through
    /// [`CacheClient::query_with_logical_expire`].
    pub async fn set_with_logical_expire<I, V>(
        &self,
        id: &I,
        value: &V,
        logical_ttl: Duration,
    ) -> Result<()>
    where
        I: Display + ?Sized,
        V: Serialize,
    {
        let key = self.config.keys.data_key(id);
        let payload = self.codec.wrap_logical(value, logical_deadline(logical_ttl)?)?;
        self.store.set_no_expiry(&key, &payload).await
    }

    /// Delete the cached entry for `id`
    ///
    /// # Returns
    /// True if an entry was removed
    pub async fn invalidate<I: Display + ?Sized>(&self, id: &I) -> Result<bool> {
        let key = self.config.keys.data_key(id);
        let removed = self.store.delete(&key).await?;
        debug!(key = %key, removed, "Cache entry invalidated");
        Ok(removed)
    }

    // ========================================================================
    // Read strategies
    // ========================================================================

    /// Read `id`, loading from the source on a miss and caching absence
    ///
    /// A loader result of `None` is stored as a tombstone for the client's
    /// null TTL, so repeated reads of a missing id stay off the source.
    pub async fn query_with_pass_through<I, V, F, Fut, E>(
        &self,
        id: I,
        loader: F,
        ttl: Duration,
    ) -> Result<Option<V>>
    where
        I: Display,
        V: Serialize + DeserializeOwned,
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = std::result::Result<Option<V>, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let key = self.config.keys.data_key(&id);
        match self.lookup(&key).await? {
            CacheLookup::Hit(payload) => self.decode_hit(&payload).map(Some),
            CacheLookup::Tombstone => Ok(None),
            CacheLookup::Miss => self.load_and_store(&key, id, loader, ttl).await,
        }
    }

    /// Read `id`, letting at most one caller at a time run the loader
    ///
    /// Callers that lose the lock race back off per the client's
    /// [`RetryPolicy`] and read again.
    ///
    /// # Errors
    /// - [`Error::LockTimeout`] once the retry budget is spent
    /// - [`Error::Cancelled`] if the client is cancelled during a backoff
    pub async fn query_with_mutex<I, V, F, Fut, E>(
        &self,
        id: I,
        loader: F,
        ttl: Duration,
    ) -> Result<Option<V>>
    where
        I: Display,
        V: Serialize + DeserializeOwned,
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = std::result::Result<Option<V>, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let key = self.config.keys.data_key(&id);
        let retry = self.config.retry;

        for attempt in 0..retry.max_attempts {
            match self.lookup(&key).await? {
                CacheLookup::Hit(payload) => return self.decode_hit(&payload).map(Some),
                CacheLookup::Tombstone => return Ok(None),
                CacheLookup::Miss => {}
            }

            if let Some(guard) = self.locks.try_lock(&id).await? {
                let result = self.rebuild_under_lock(&key, id, loader, ttl).await;
                guard.release().await;
                return result;
            }

            self.stats.lock_contention();
            if attempt + 1 < retry.max_attempts {
                let delay = retry.backoff_for(attempt);
                debug!(key = %key, attempt, delay = ?delay, "Lock contended, backing off");
                tokio::select! {
                    () = self.cancel.cancelled() => return Err(Error::cancelled(key.as_str())),
                    () = tokio::time::sleep(delay) => {}
                }
            }
        }

        warn!(key = %key, attempts = retry.max_attempts, "Gave up waiting for rebuild lock");
        Err(Error::lock_timeout(key, retry.max_attempts))
    }

    /// Read `id` from a logically expiring entry without waiting on the source
    ///
    /// A fresh entry is returned as is. A stale entry is returned as is too,
    /// after handing a rebuild to the scheduler if this caller won the lock.
    /// A missing entry yields `None`; these keys are expected to be warmed
    /// with [`CacheClient::set_with_logical_expire`].
    pub async fn query_with_logical_expire<I, V, F, Fut, E>(
        &self,
        id: I,
        loader: F,
        logical_ttl: Duration,
    ) -> Result<Option<V>>
    where
        I: Display + Send + 'static,
        V: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce(I) -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<Option<V>, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let key = self.config.keys.data_key(&id);
        let payload = match self.lookup(&key).await? {
            CacheLookup::Hit(payload) => payload,
            CacheLookup::Tombstone | CacheLookup::Miss => return Ok(None),
        };

        let entry = self.codec.unwrap_logical::<V>(&payload)?;
        if !entry.is_expired() {
            self.stats.hit();
            return Ok(Some(entry.data));
        }

        let Some(guard) = self.locks.try_lock(&id).await? else {
            self.stats.lock_contention();
            self.stats.stale_read();
            debug!(key = %key, "Rebuild already in progress, serving stale entry");
            return Ok(Some(entry.data));
        };

        match self.fresh_logical::<V>(&key).await {
            Ok(Some(refreshed)) => {
                guard.release().await;
                return Ok(Some(refreshed));
            }
            Ok(None) => {}
            Err(e) => {
                guard.release().await;
                return Err(e);
            }
        }

        let task = self.logical_rebuild_task(key.clone(), id, loader, logical_ttl, guard);
        match self.scheduler.submit(task) {
            Ok(()) => {
                self.stats.rebuild_scheduled();
                debug!(key = %key, "Logical rebuild scheduled");
            }
            Err(e) => {
                self.stats.rebuild_rejected();
                warn!(key = %key, error = %e, "Logical rebuild rejected, serving stale entry");
            }
        }

        self.stats.stale_read();
        Ok(Some(entry.data))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn lookup(&self, key: &str) -> Result<CacheLookup> {
        let lookup = CacheLookup::from_raw(self.store.get(key).await?);
        match &lookup {
            CacheLookup::Miss => {
                self.stats.miss();
                debug!(key = %key, "Cache miss");
            }
            CacheLookup::Tombstone => {
                self.stats.tombstone_hit();
                debug!(key = %key, "Tombstone hit");
            }
            CacheLookup::Hit(_) => debug!(key = %key, "Cache hit"),
        }
        Ok(lookup)
    }

    fn decode_hit<V: DeserializeOwned>(&self, payload: &str) -> Result<V> {
        let value = self.codec.decode(payload)?;
        self.stats.hit();
        Ok(value)
    }

    /// Double-check under the lock, then load if still missing
    async fn rebuild_under_lock<I, V, F, Fut, E>(
        &self,
        key: &str,
        id: I,
        loader: F,
        ttl: Duration,
    ) -> Result<Option<V>>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = std::result::Result<Option<V>, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        match CacheLookup::from_raw(self.store.get(key).await?) {
            CacheLookup::Hit(payload) => {
                debug!(key = %key, "Entry rebuilt by another caller");
                self.decode_hit(&payload).map(Some)
            }
            CacheLookup::Tombstone => Ok(None),
            CacheLookup::Miss => self.load_and_store(key, id, loader, ttl).await,
        }
    }

    async fn load_and_store<I, V, F, Fut, E>(
        &self,
        key: &str,
        id: I,
        loader: F,
        ttl: Duration,
    ) -> Result<Option<V>>
    where
        V: Serialize,
        F: FnOnce(I) -> Fut,
        Fut: Future<Output = std::result::Result<Option<V>, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.stats.loader_call();
        let loaded = loader(id).await.map_err(|e| Error::loader(key, e))?;
        match loaded {
            Some(value) => {
                let payload = self.codec.encode(&value)?;
                self.store.set(key, &payload, ttl).await?;
                debug!(key = %key, ttl_secs = ttl.as_secs(), "Entry cached from source");
                Ok(Some(value))
            }
            None => {
                self.store.set(key, TOMBSTONE, self.config.null_ttl).await?;
                debug!(key = %key, "Source has no record, tombstone cached");
                Ok(None)
            }
        }
    }

    /// Payload of the current logical entry, if it is fresh
    async fn fresh_logical<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        match CacheLookup::from_raw(self.store.get(key).await?) {
            CacheLookup::Hit(payload) => {
                let entry = self.codec.unwrap_logical::<V>(&payload)?;
                Ok((!entry.is_expired()).then_some(entry.data))
            }
            CacheLookup::Tombstone | CacheLookup::Miss => Ok(None),
        }
    }

    fn logical_rebuild_task<I, V, F, Fut, E>(
        &self,
        key: String,
        id: I,
        loader: F,
        logical_ttl: Duration,
        guard: LockGuard,
    ) -> RebuildTask
    where
        I: Send + 'static,
        V: Serialize + Send + 'static,
        F: FnOnce(I) -> Fut + Send + 'static,
        Fut: Future<Output = std::result::Result<Option<V>, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let store = Arc::clone(&self.store);
        let codec = self.codec;
        let stats = Arc::clone(&self.stats);
        let task_key = key.clone();

        RebuildTask::new(task_key, async move {
            stats.loader_call();
            let outcome = rebuild_logical(store.as_ref(), codec, &key, id, loader, logical_ttl).await;
            guard.release().await;
            outcome
        })
    }
}

async fn rebuild_logical<I, V, F, Fut, E>(
    store: &dyn CacheStore,
    codec: JsonCodec,
    key: &str,
    id: I,
    loader: F,
    logical_ttl: Duration,
) -> Result<()>
where
    V: Serialize,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = std::result::Result<Option<V>, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let Some(value) = loader(id).await.map_err(|e| Error::loader(key, e))? else {
        return Err(Error::not_found(format!(
            "source returned no value for {key}, keeping stale entry"
        )));
    };
    let expire_time = logical_deadline(logical_ttl)?;
    let payload = codec.wrap_logical(&value, expire_time)?;
    store.set_no_expiry(key, &payload).await?;
    info!(key = %key, expire_time = %expire_time, "Logical entry refreshed");
    Ok(())
}

fn logical_deadline(logical_ttl: Duration) -> Result<DateTime<Utc>> {
    let ttl = chrono::Duration::from_std(logical_ttl).map_err(|_| {
        Error::invalid_argument(format!("Logical TTL {logical_ttl:?} is out of range"))
    })?;
    Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| Error::invalid_argument(format!("Logical TTL {logical_ttl:?} overflows")))
}

impl fmt::Debug for CacheClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheClient")
            .field("store", &self.store.provider_name())
            .field("config", &self.config)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
