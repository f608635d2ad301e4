//! Redis distributed store provider
//!
//! Store shared by every process pointing at the same Redis server, so
//! tombstones, logical entries and locks are seen cluster-wide.
//!
//! | Operation | Command |
//! |-----------|---------|
//! | `get` | `GET key` |
//! | `set` | `SET key value PX ttl` |
//! | `set_no_expiry` | `SET key value` |
//! | `try_acquire_lock` | `SET key 1 NX PX ttl` |
//! | `release_lock`, `delete` | `DEL key` |
//!
//! ## Example
//!
//! ```ignore
//! use stampede_providers::cache::RedisCacheStore;
//!
//! let store = RedisCacheStore::new("redis://localhost:6379")?;
//! // Or with host/port
//! let store = RedisCacheStore::with_host_port("localhost", 6379)?;
//! ```

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use stampede_domain::constants::LOCK_MARKER;
use stampede_domain::error::{Error, Result};
use stampede_domain::ports::providers::CacheStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Redis store provider
///
/// The connection is opened on first use and then shared; the connection
/// manager reconnects on its own after network failures.
#[derive(Clone)]
pub struct RedisCacheStore {
    client: Client,
    address: String,
    connection: Arc<OnceCell<ConnectionManager>>,
}

impl RedisCacheStore {
    /// Create a new Redis store with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string)
            .map_err(|e| Error::store_with_source("Failed to create Redis client", e))?;

        Ok(Self {
            client,
            address: redact_credentials(connection_string),
            connection: Arc::new(OnceCell::new()),
        })
    }

    /// Create a new Redis store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Get the shared connection, opening it on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                debug!(server = %self.server_address(), "Opening Redis connection");
                ConnectionManager::new(self.client.clone()).await
            })
            .await
            .map_err(|e| Error::store_with_source("Failed to get Redis connection", e))?;
        Ok(manager.clone())
    }

    /// Get the Redis server address, without credentials
    pub fn server_address(&self) -> &str {
        &self.address
    }
}

fn redact_credentials(uri: &str) -> String {
    match (uri.split_once("://"), uri.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, host))) => format!("{scheme}://{host}"),
        _ => uri.to_string(),
    }
}

/// Redis rejects `PX 0`; round sub-millisecond TTLs up
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}


#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| Error::store_with_source(format!("Redis GET {key} failed"), e))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;

        let result: redis::RedisResult<()> = conn.pset_ex(key, value, ttl_millis(ttl)).await;
        result.map_err(|e| Error::store_with_source(format!("Redis SET {key} PX failed"), e))
    }

    async fn set_no_expiry(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;

        let result: redis::RedisResult<()> = conn.set(key, value).await;
        result.map_err(|e| Error::store_with_source(format!("Redis SET {key} failed"), e))
    }

    async fn try_acquire_lock(&self, lock_key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(lock_key)
            .arg(LOCK_MARKER)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                Error::store_with_source(format!("Redis SET {lock_key} NX PX failed"), e)
            })?;

        Ok(reply.is_some())
    }

    async fn release_lock(&self, lock_key: &str) -> Result<()> {
        self.delete(lock_key).await.map(|_| ())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        let deleted: redis::RedisResult<i64> = conn.del(key).await;
        match deleted {
            Ok(count) => Ok(count > 0),
            Err(e) => Err(Error::store_with_source(format!("Redis DEL {key} failed"), e)),
        }
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("server", &self.server_address())
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use crate::constants::REDIS_DEFAULT_URI;
use stampede_application::ports::registry::{STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry};

/// Factory function for creating Redis store instances.
fn redis_store_factory(
    config: &StoreProviderConfig,
) -> std::result::Result<Arc<dyn CacheStore>, String> {
    let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URI);

    let store =
        RedisCacheStore::new(uri).map_err(|e| format!("Failed to create Redis store: {e}"))?;

    Ok(Arc::new(store))
}

#[linkme::distributed_slice(STORE_PROVIDERS)]
static REDIS_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "redis",
    description: "Redis distributed store",
    factory: redis_store_factory,
};
