//! Provider Registry System
//!
//! Store providers register themselves at link time through a linkme
//! distributed slice and are resolved by name at runtime.
//!
//! ## Usage
//!
//! ### Registering a Provider (in stampede-providers)
//!
//! ```ignore
//! use stampede_application::ports::registry::{StoreProviderEntry, STORE_PROVIDERS};
//!
//! #[linkme::distributed_slice(STORE_PROVIDERS)]
//! static MOKA_PROVIDER: StoreProviderEntry = StoreProviderEntry {
//!     name: "moka",
//!     description: "In-process store with per-entry TTL",
//!     factory: |config| Ok(Arc::new(MokaCacheStore::from_config(config))),
//! };
//! ```
//!
//! ### Resolving a Provider (in stampede-infrastructure)
//!
//! ```ignore
//! use stampede_application::ports::registry::{resolve_store_provider, StoreProviderConfig};
//!
//! let store = resolve_store_provider(&StoreProviderConfig::new("moka"))?;
//! ```

pub mod store;

pub use store::{
    STORE_PROVIDERS, StoreProviderConfig, StoreProviderEntry, list_store_providers,
    resolve_store_provider,
};
