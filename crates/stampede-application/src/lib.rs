//! Application Layer - Stampede
//!
//! Coordination logic of the cache-aside layer, written against the
//! [`CacheStore`](stampede_domain::CacheStore) port only.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`codec`] | JSON payload codec and logical-entry wrapping |
//! | [`lock`] | Per-key distributed mutex with self-expiring locks |
//! | [`scheduler`] | Bounded worker pool for background rebuilds |
//! | [`use_cases`] | [`CacheClient`] with the pass-through, mutex and logical-expiration reads |
//! | [`ports`] | Store provider registry |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `stampede-domain`: store port, value objects and errors
//! - Pure Rust libraries for async, serialization, etc.

pub mod codec;
pub mod lock;
pub mod ports;
pub mod scheduler;
pub mod use_cases;

pub use codec::JsonCodec;
pub use lock::{LockGuard, LockManager};
pub use ports::*;
pub use scheduler::{RebuildEvent, RebuildScheduler, RebuildTask, SchedulerConfig};
pub use use_cases::*;
