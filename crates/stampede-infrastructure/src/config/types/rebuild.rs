//! Rebuild pool configuration types

use serde::{Deserialize, Serialize};
use stampede_application::SchedulerConfig;
use stampede_domain::constants::{DEFAULT_REBUILD_QUEUE_CAPACITY, DEFAULT_REBUILD_WORKERS};

/// Background rebuild pool configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebuildConfig {
    /// Number of concurrent rebuild workers
    pub workers: usize,

    /// Rebuilds that may wait for a worker before new ones are rejected
    pub queue_capacity: usize,
}

impl From<RebuildConfig> for SchedulerConfig {
    fn from(config: RebuildConfig) -> Self {
        Self {
            workers: config.workers,
            queue_capacity: config.queue_capacity,
        }
    }
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_REBUILD_WORKERS,
            queue_capacity: DEFAULT_REBUILD_QUEUE_CAPACITY,
        }
    }
}
