//! Retry configuration types

use serde::{Deserialize, Serialize};
use stampede_application::RetryPolicy;
use stampede_domain::constants::{
    DEFAULT_RETRY_INITIAL_BACKOFF_MS, DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_RETRY_MAX_BACKOFF_MS,
    DEFAULT_RETRY_MULTIPLIER,
};
use std::time::Duration;

/// Backoff of the mutex strategy while a lock is contended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Lock acquisition attempts before giving up
    pub max_attempts: u32,

    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,

    /// Backoff growth factor
    pub multiplier: f64,
}

impl RetryConfig {
    /// Retry policy for the cache client
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            multiplier: self.multiplier,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_RETRY_INITIAL_BACKOFF_MS,
            max_backoff_ms: DEFAULT_RETRY_MAX_BACKOFF_MS,
            multiplier: DEFAULT_RETRY_MULTIPLIER,
        }
    }
}
