//! # Stampede
//!
//! A cache-aside access layer over a shared key-value store. Reads go to
//! the store first and fall back to a caller-supplied loader, with three
//! defenses against the classic cache failure modes:
//!
//! - **Penetration**: pass-through reads cache "not found" as a short-lived
//!   tombstone, so repeated lookups of missing ids stop reaching the source
//! - **Breakdown**: mutex reads let exactly one caller rebuild a hot key
//!   while the rest back off and re-read
//! - **Avalanche**: logical-expiration reads keep serving the stale value
//!   while a background worker refreshes it
//!
//! ## Example
//!
//! ```ignore
//! use stampede::infrastructure::{ConfigLoader, build_client};
//!
//! let config = ConfigLoader::new().load()?;
//! let client = build_client(&config)?;
//!
//! let shop: Option<Shop> = client
//!     .query_with_mutex(42, |id| repo.find_shop(id), config.ttl.entry_ttl())
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Errors, cache keys, logical entries and the store port
//! - `application` - Codec, lock manager, rebuild scheduler and the cache client
//! - `providers` - Store adapters (Moka, Redis, null) registered via linkme
//! - `infrastructure` - Configuration, logging and client bootstrap

/// Domain layer - errors, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use stampede_domain::*;
}

/// Application layer - cache client and coordination services
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use stampede_application::*;
}

/// Store provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use stampede_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use stampede_infrastructure::*;
}

// Re-export the types most callers need at the crate root
pub use application::{CacheClient, CacheClientConfig, ClientStats, RetryPolicy};
pub use domain::error::{Error, Result};
pub use infrastructure::{AppConfig, ConfigLoader, build_client};
