//! Store Provider Registry
//!
//! Providers register a [`StoreProviderEntry`] into [`STORE_PROVIDERS`] at
//! link time; infrastructure resolves the configured one by name.

use std::sync::Arc;

use stampede_domain::ports::providers::CacheStore;

/// Configuration for store provider creation
///
/// Providers read the fields they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct StoreProviderConfig {
    /// Provider name (e.g., "moka", "redis", "null")
    pub provider: String,
    /// Connection URI (for distributed stores)
    pub uri: Option<String>,
    /// Maximum number of entries (for in-process stores)
    pub max_capacity: Option<u64>,
}

impl StoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the entry capacity
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }
}

/// Registry entry for store providers
pub struct StoreProviderEntry {
    /// Unique provider name (e.g., "moka", "redis", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&StoreProviderConfig) -> Result<Arc<dyn CacheStore>, String>,
}

#[linkme::distributed_slice]
pub static STORE_PROVIDERS: [StoreProviderEntry] = [..];

/// Resolve store provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn CacheStore>)` - Created store instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_store_provider(config: &StoreProviderConfig) -> Result<Arc<dyn CacheStore>, String> {
    let provider_name = &config.provider;

    for entry in STORE_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = STORE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown store provider '{}'. Available providers: {:?}",
        provider_name, available
    ))
}

/// List all registered store providers
///
/// # Returns
/// (name, description) pairs for every registered provider
pub fn list_store_providers() -> Vec<(&'static str, &'static str)> {
    STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
