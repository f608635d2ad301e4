//! Provider-specific constants

// ============================================================================
// STORE PROVIDER CONSTANTS
// ============================================================================

/// Default entry capacity of the in-process Moka store
pub const MOKA_DEFAULT_MAX_CAPACITY: u64 = 100_000;

/// Redis default connection URI
pub const REDIS_DEFAULT_URI: &str = "redis://localhost:6379";
