//! # Domain Layer
//!
//! Core types of the Stampede cache-aside layer: the key-value store port,
//! the value objects exchanged between strategies and the store, and the
//! shared error type.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | `Error` and `Result` shared by every layer |
//! | [`ports`] | `CacheStore` boundary implemented by store providers |
//! | [`value_objects`] | Logical entries, lookup classification, key namespaces |
//! | [`constants`] | Reserved store values and documented defaults |
//!
//! ## Dependencies
//!
//! This crate depends only on pure libraries (serde, thiserror, chrono,
//! async-trait). Store implementations live in `stampede-providers`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::providers::CacheStore;
pub use value_objects::{CacheKeys, CacheLookup, LogicalEntry};
