//! Domain Value Objects
//!
//! Immutable value objects exchanged between the strategies and the store.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`LogicalEntry`] | Payload paired with a soft (logical) expiry timestamp |
//! | [`CacheLookup`] | Classification of a raw store read (miss, tombstone, hit) |
//! | [`CacheKeys`] | Data and lock key namespaces |

/// Cache entry value objects
pub mod entry;
/// Key namespace value objects
pub mod keys;

pub use entry::{CacheLookup, LogicalEntry};
pub use keys::CacheKeys;
