//! # Stampede - Store Provider Implementations
//!
//! Key-value stores implementing the [`CacheStore`] port defined in
//! `stampede-domain`. Each provider registers itself into the store
//! registry of `stampede-application` at link time.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `moka` | `cache-moka` (default) | In-process store with per-entry TTL |
//! | `redis` | `cache-redis` | Distributed store shared by several processes |
//! | `null` | always | Stores nothing; disables caching |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! stampede-providers = { version = "0.1", default-features = false, features = ["cache-redis"] }
//! ```

// Re-export stampede-domain types commonly used with providers
pub use stampede_domain::error::{Error, Result};
pub use stampede_domain::ports::providers::CacheStore;

/// Provider-specific constants
pub mod constants;

/// Store provider implementations
///
/// Implements the `CacheStore` trait for key-value backends.
pub mod cache;

#[cfg(feature = "cache-moka")]
pub use cache::MokaCacheStore;
pub use cache::NullCacheStore;
#[cfg(feature = "cache-redis")]
pub use cache::RedisCacheStore;
