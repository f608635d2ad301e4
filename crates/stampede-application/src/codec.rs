//! JSON payload codec
//!
//! Turns typed values into store payloads and back. The target type of a
//! decode is the caller's type parameter; nothing is inferred at runtime.
//!
//! ## Example
//!
//! ```ignore
//! use stampede_application::codec::JsonCodec;
//!
//! let codec = JsonCodec;
//! let payload = codec.encode(&shop)?;
//! let back: Shop = codec.decode(&payload)?;
//!
//! let wrapped = codec.wrap_logical(&shop, Utc::now() + Duration::minutes(30))?;
//! let (shop, expire_time) = codec.unwrap_logical::<Shop>(&wrapped)?.into_parts();
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stampede_domain::error::{Error, Result};
use stampede_domain::value_objects::LogicalEntry;

/// Stateless JSON codec for cache payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Serialize a value into a store payload
    pub fn encode<T>(&self, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_string(value)
            .map_err(|e| Error::serialization_with_source("Failed to encode cache payload", e))
    }

    /// Deserialize a store payload into `T`
    pub fn decode<T>(&self, payload: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(payload).map_err(|e| {
            Error::deserialization_with_source(format!("Malformed cache payload: {e}"), e)
        })
    }

    /// Serialize a value together with its logical expiry
    pub fn wrap_logical<T>(&self, value: &T, expire_time: DateTime<Utc>) -> Result<String>
    where
        T: Serialize,
    {
        self.encode(&LogicalEntry::new(value, expire_time))
    }

    /// Deserialize a payload written by [`JsonCodec::wrap_logical`]
    pub fn unwrap_logical<T>(&self, payload: &str) -> Result<LogicalEntry<T>>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(payload).map_err(|e| {
            Error::deserialization_with_source(format!("Malformed logical cache entry: {e}"), e)
        })
    }
}
