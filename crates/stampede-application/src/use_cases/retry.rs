//! Backoff policy for the mutex-protected read

use stampede_domain::constants::{
    DEFAULT_RETRY_INITIAL_BACKOFF_MS, DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_RETRY_MAX_BACKOFF_MS,
    DEFAULT_RETRY_MULTIPLIER,
};
use stampede_domain::error::{Error, Result};
use std::time::Duration;

/// Bounded retry with exponential backoff
///
/// A `multiplier` of 1.0 gives a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Lock acquisition attempts before giving up
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_backoff: Duration,
    /// Upper bound on any single delay
    pub max_backoff: Duration,
    /// Growth factor applied after each failed attempt
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Fixed delay between a bounded number of attempts
    pub fn fixed(delay: Duration, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: delay,
            max_backoff: delay,
            multiplier: 1.0,
        }
    }

    /// Check the policy can make progress
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::invalid_argument(
                "Retry policy needs at least one attempt",
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(Error::invalid_argument(format!(
                "Retry multiplier must be a finite value >= 1.0, got {}",
                self.multiplier
            )));
        }
        if self.initial_backoff > self.max_backoff {
            return Err(Error::invalid_argument(
                "Initial backoff cannot exceed the maximum backoff",
            ));
        }
        Ok(())
    }

    /// Delay to wait after failed attempt number `attempt` (zero-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.initial_backoff.as_secs_f64() * self.multiplier.powi(exponent);
        if !secs.is_finite() || secs >= self.max_backoff.as_secs_f64() {
            self.max_backoff
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(DEFAULT_RETRY_INITIAL_BACKOFF_MS),
            max_backoff: Duration::from_millis(DEFAULT_RETRY_MAX_BACKOFF_MS),
            multiplier: DEFAULT_RETRY_MULTIPLIER,
        }
    }
}
