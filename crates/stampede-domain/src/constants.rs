//! Domain layer constants
//!
//! Reserved store values and the documented defaults for every tunable.
//! Infrastructure-specific constants remain in
//! `stampede_infrastructure::constants`.

// ============================================================================
// RESERVED STORE VALUES
// ============================================================================

/// Tombstone marker written for keys confirmed absent from the source.
///
/// JSON encoding never yields an empty string, so the marker cannot collide
/// with a real payload.
pub const TOMBSTONE: &str = "";

/// Constant value held by every distributed lock key
pub const LOCK_MARKER: &str = "1";

// ============================================================================
// KEY NAMESPACE DEFAULTS
// ============================================================================

/// Default prefix for data keys
pub const DEFAULT_CACHE_PREFIX: &str = "cache:";

/// Default prefix for lock keys
pub const DEFAULT_LOCK_PREFIX: &str = "lock:";

// ============================================================================
// TTL DEFAULTS
// ============================================================================

/// Default TTL for positive entries in seconds (30 minutes)
pub const DEFAULT_ENTRY_TTL_SECS: u64 = 30 * 60;

/// Default TTL for tombstones in seconds (2 minutes)
pub const DEFAULT_NULL_TTL_SECS: u64 = 2 * 60;

/// Default lock TTL in seconds
pub const DEFAULT_LOCK_TTL_SECS: u64 = 10;

/// Default logical lifetime for soft-expiring entries in seconds (30 minutes)
pub const DEFAULT_LOGICAL_TTL_SECS: u64 = 30 * 60;

// ============================================================================
// REBUILD SCHEDULER DEFAULTS
// ============================================================================

/// Default number of rebuild workers
pub const DEFAULT_REBUILD_WORKERS: usize = 10;

/// Default number of queued rebuild tasks before submissions are rejected
pub const DEFAULT_REBUILD_QUEUE_CAPACITY: usize = 256;

/// Capacity of the rebuild outcome broadcast channel
pub const REBUILD_EVENT_CHANNEL_CAPACITY: usize = 1024;

// ============================================================================
// MUTEX RETRY DEFAULTS
// ============================================================================

/// Default maximum lock acquisition attempts for the mutex strategy
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 20;

/// Default first backoff between lock attempts in milliseconds
pub const DEFAULT_RETRY_INITIAL_BACKOFF_MS: u64 = 50;

/// Default backoff ceiling in milliseconds
pub const DEFAULT_RETRY_MAX_BACKOFF_MS: u64 = 1_000;

/// Default backoff growth factor
pub const DEFAULT_RETRY_MULTIPLIER: f64 = 2.0;
