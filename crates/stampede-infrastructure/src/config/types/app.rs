//! Root application configuration

use super::{KeysConfig, LoggingConfig, RebuildConfig, RetryConfig, StoreConfig, TtlConfig};
use serde::{Deserialize, Serialize};
use stampede_application::CacheClientConfig;
use stampede_domain::error::Result;

/// Main application configuration
///
/// ```toml
/// [store]
/// provider = "redis"
/// redis_url = "redis://localhost:6379"
///
/// [ttl]
/// entry_ttl_secs = 1800
/// null_ttl_secs = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key-value store selection
    pub store: StoreConfig,
    /// Key namespaces
    pub keys: KeysConfig,
    /// Entry, tombstone, lock and logical TTLs
    pub ttl: TtlConfig,
    /// Background rebuild pool
    pub rebuild: RebuildConfig,
    /// Mutex strategy backoff
    pub retry: RetryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Client settings derived from this configuration
    pub fn client_config(&self) -> Result<CacheClientConfig> {
        Ok(CacheClientConfig {
            keys: self.keys.to_cache_keys()?,
            null_ttl: self.ttl.null_ttl(),
            lock_ttl: self.ttl.lock_ttl(),
            retry: self.retry.to_policy(),
        })
    }
}
