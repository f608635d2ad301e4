//! Cache Entry Value Objects

use crate::constants::TOMBSTONE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value Object: Logically Expiring Entry
///
/// A payload persisted without physical TTL together with the instant it
/// becomes stale. Staleness is decided at read time by comparing
/// `expire_time` with the current time; the store never evicts it.
///
/// ## Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use stampede_domain::LogicalEntry;
///
/// let entry = LogicalEntry::new("payload", Utc::now() + Duration::minutes(5));
/// assert!(!entry.is_expired());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogicalEntry<T> {
    /// The cached payload
    pub data: T,
    /// Instant after which the payload is considered stale
    pub expire_time: DateTime<Utc>,
}

impl<T> LogicalEntry<T> {
    /// Pair a payload with its logical expiry
    pub fn new(data: T, expire_time: DateTime<Utc>) -> Self {
        Self { data, expire_time }
    }

    /// Whether the entry is stale relative to `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_time <= now
    }

    /// Whether the entry is stale right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Split into payload and expiry
    pub fn into_parts(self) -> (T, DateTime<Utc>) {
        (self.data, self.expire_time)
    }
}

/// Value Object: Classified Store Read
///
/// Every strategy makes the same three-way decision on a raw read; this type
/// keeps that decision in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Nothing stored under the key
    Miss,
    /// The key is negative-cached: the source confirmed it absent
    Tombstone,
    /// A real payload is stored
    Hit(String),
}

impl CacheLookup {
    /// Classify the raw result of `CacheStore::get`
    pub fn from_raw(raw: Option<String>) -> Self {
        match raw {
            None => Self::Miss,
            Some(value) if value == TOMBSTONE => Self::Tombstone,
            Some(value) => Self::Hit(value),
        }
    }

    /// Whether anything (payload or tombstone) is stored
    pub fn is_populated(&self) -> bool {
        !matches!(self, Self::Miss)
    }
}
