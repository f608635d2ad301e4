//! Configuration
//!
//! Layered with figment: [`AppConfig::default`], then a TOML file, then
//! `STAMPEDE__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
