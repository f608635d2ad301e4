//! Key Namespace Value Objects

use crate::constants::{DEFAULT_CACHE_PREFIX, DEFAULT_LOCK_PREFIX};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Value Object: Key Namespaces
///
/// Data keys are `prefix + id`; lock keys are `lock_prefix + id`. Neither
/// prefix may be a prefix of the other, so no id can make a lock key equal
/// to a data key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKeys {
    /// Prefix for data keys
    pub prefix: String,
    /// Prefix for lock keys
    pub lock_prefix: String,
}

impl CacheKeys {
    /// Create key namespaces, rejecting colliding prefixes
    pub fn new<P: Into<String>, L: Into<String>>(prefix: P, lock_prefix: L) -> Result<Self> {
        let keys = Self {
            prefix: prefix.into(),
            lock_prefix: lock_prefix.into(),
        };
        keys.validate()?;
        Ok(keys)
    }

    /// Check that the lock namespace is disjoint from the data namespace
    ///
    /// Neither prefix may start with the other. With `cache:` and
    /// `cache:lock:`, the lock for id `1` and the data for id `lock:1`
    /// would share the key `cache:lock:1`.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.starts_with(&self.lock_prefix) || self.lock_prefix.starts_with(&self.prefix)
        {
            return Err(Error::invalid_argument(format!(
                "Lock prefix '{}' and data prefix '{}' overlap; neither may start with the other",
                self.lock_prefix, self.prefix
            )));
        }
        Ok(())
    }

    /// Data key for an id
    pub fn data_key<I: Display + ?Sized>(&self, id: &I) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Lock key for an id
    pub fn lock_key<I: Display + ?Sized>(&self, id: &I) -> String {
        format!("{}{}", self.lock_prefix, id)
    }
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
            lock_prefix: DEFAULT_LOCK_PREFIX.to_string(),
        }
    }
}
