//! Store Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheStore`] | Testing | Stores nothing, every lock acquisition succeeds |
//! | [`MokaCacheStore`] | Local | In-process store with per-entry TTL |
//! | [`RedisCacheStore`] | Distributed | Redis-backed for multi-instance |
//!
//! ## Provider Selection Guide
//!
//! - **Disabling caching**: Use `NullCacheStore`
//! - **Single Instance**: Use `MokaCacheStore`; locks only exclude callers in the same process
//! - **Multi Instance**: Use `RedisCacheStore` so locks and tombstones are shared

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheStore;
pub use null::NullCacheStore;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheStore;
