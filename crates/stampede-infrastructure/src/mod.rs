//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the cache client.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Builds a [`CacheClient`](stampede_application::CacheClient) from configuration |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`constants`] | Infrastructure constants |

// Force linkme registration of all store providers
extern crate stampede_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{build_client, create_scheduler, create_store};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
