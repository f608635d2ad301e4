//! Store configuration types

use crate::constants::{DEFAULT_STORE_MAX_CAPACITY, DEFAULT_STORE_PROVIDER};
use serde::{Deserialize, Serialize};
use stampede_application::StoreProviderConfig;

/// Key-value store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Registered provider name ("moka", "redis", "null")
    pub provider: String,

    /// Redis URL (for the Redis provider)
    pub redis_url: Option<String>,

    /// Maximum number of entries (for the Moka provider)
    pub max_capacity: u64,
}

impl StoreConfig {
    /// Registry lookup request for this store
    pub fn to_provider_config(&self) -> StoreProviderConfig {
        let config =
            StoreProviderConfig::new(self.provider.as_str()).with_max_capacity(self.max_capacity);
        match &self.redis_url {
            Some(url) => config.with_uri(url.as_str()),
            None => config,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_STORE_PROVIDER.to_string(),
            redis_url: None,
            max_capacity: DEFAULT_STORE_MAX_CAPACITY,
        }
    }
}
