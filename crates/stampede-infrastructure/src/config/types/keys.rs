//! Key namespace configuration types

use serde::{Deserialize, Serialize};
use stampede_domain::constants::{DEFAULT_CACHE_PREFIX, DEFAULT_LOCK_PREFIX};
use stampede_domain::error::Result;
use stampede_domain::value_objects::CacheKeys;

/// Key namespace configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Prefix of data keys
    pub prefix: String,

    /// Prefix of lock keys
    pub lock_prefix: String,
}

impl KeysConfig {
    /// Validated key namespaces
    pub fn to_cache_keys(&self) -> Result<CacheKeys> {
        CacheKeys::new(self.prefix.as_str(), self.lock_prefix.as_str())
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
            lock_prefix: DEFAULT_LOCK_PREFIX.to_string(),
        }
    }
}
