//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheStore | Atomic primitives over the key-value store used as cache |

/// Key-value store port
pub mod store;

pub use store::CacheStore;
