//! Domain Port Interfaces
//!
//! Boundary contracts between the coordination logic and the outside world.
//! The only external collaborator owned by this layer is the key-value store;
//! the authoritative source is reached through caller-supplied loaders.

/// External service provider ports
pub mod providers;

pub use providers::CacheStore;
