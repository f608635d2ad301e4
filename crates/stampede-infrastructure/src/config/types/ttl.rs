//! TTL configuration types

use serde::{Deserialize, Serialize};
use stampede_domain::constants::{
    DEFAULT_ENTRY_TTL_SECS, DEFAULT_LOCK_TTL_SECS, DEFAULT_LOGICAL_TTL_SECS, DEFAULT_NULL_TTL_SECS,
};
use std::time::Duration;

/// TTL configuration, in seconds
///
/// `null_ttl_secs` and `lock_ttl_secs` are wired into the client by
/// `build_client`. The client takes entry and logical TTLs per call, so
/// `entry_ttl_secs` and `logical_ttl_secs` are defaults for callers to pass
/// through [`TtlConfig::entry_ttl`] and [`TtlConfig::logical_ttl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlConfig {
    /// Default physical TTL of positive entries
    pub entry_ttl_secs: u64,

    /// Physical TTL of tombstones; shorter than `entry_ttl_secs`
    pub null_ttl_secs: u64,

    /// TTL of rebuild locks
    pub lock_ttl_secs: u64,

    /// Default logical TTL of entries read with logical expiration
    pub logical_ttl_secs: u64,
}

impl TtlConfig {
    /// Caller-facing default for `set` and `query_with_*` entry TTLs
    pub fn entry_ttl(&self) -> Duration {
        Duration::from_secs(self.entry_ttl_secs)
    }

    /// Physical TTL of tombstones
    pub fn null_ttl(&self) -> Duration {
        Duration::from_secs(self.null_ttl_secs)
    }

    /// TTL of rebuild locks
    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_ttl_secs)
    }

    /// Caller-facing default for logical-expiration TTLs
    pub fn logical_ttl(&self) -> Duration {
        Duration::from_secs(self.logical_ttl_secs)
    }
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            entry_ttl_secs: DEFAULT_ENTRY_TTL_SECS,
            null_ttl_secs: DEFAULT_NULL_TTL_SECS,
            lock_ttl_secs: DEFAULT_LOCK_TTL_SECS,
            logical_ttl_secs: DEFAULT_LOGICAL_TTL_SECS,
        }
    }
}
