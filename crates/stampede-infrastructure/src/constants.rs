//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `stampede_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "stampede.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "stampede";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "STAMPEDE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORE CONSTANTS
// ============================================================================

/// Store provider used when none is configured
pub const DEFAULT_STORE_PROVIDER: &str = "moka";

/// Entry capacity of in-process stores
pub const DEFAULT_STORE_MAX_CAPACITY: u64 = 100_000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "STAMPEDE_LOG";
