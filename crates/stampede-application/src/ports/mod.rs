//! Application Ports
//!
//! - **registry/** - Auto-registration of store providers

/// Provider registry for dynamic provider discovery
pub mod registry;

pub use registry::{
    StoreProviderConfig, StoreProviderEntry, list_store_providers, resolve_store_provider,
};
