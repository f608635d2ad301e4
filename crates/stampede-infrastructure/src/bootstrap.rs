//! Client bootstrap
//!
//! Resolves the configured store from the provider registry and wires it
//! with a rebuild scheduler into a [`CacheClient`].

use crate::config::AppConfig;
use stampede_application::ports::registry::resolve_store_provider;
use stampede_application::{CacheClient, RebuildScheduler};
use stampede_domain::error::{Error, Result};
use stampede_domain::ports::providers::CacheStore;
use std::sync::Arc;
use tracing::info;

/// Create the configured store
pub fn create_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
    let store = resolve_store_provider(&config.store.to_provider_config())
        .map_err(Error::configuration)?;
    info!(provider = store.provider_name(), "Store provider resolved");
    Ok(store)
}

/// Start the rebuild worker pool on the current Tokio runtime
pub fn create_scheduler(config: &AppConfig) -> Result<RebuildScheduler> {
    RebuildScheduler::new(config.rebuild.into())
}

/// Build a cache client from configuration
///
/// Must run inside a Tokio runtime; the rebuild workers are spawned on it.
pub fn build_client(config: &AppConfig) -> Result<CacheClient> {
    let store = create_store(config)?;
    let scheduler = create_scheduler(config)?;
    CacheClient::new(store, scheduler, config.client_config()?)
}
