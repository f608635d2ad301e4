//! Configuration types module

pub mod app;
pub mod keys;
pub mod logging;
pub mod rebuild;
pub mod retry;
pub mod store;
pub mod ttl;

// Re-export main types
pub use app::AppConfig;
pub use keys::KeysConfig;
pub use logging::LoggingConfig;
pub use rebuild::RebuildConfig;
pub use retry::RetryConfig;
pub use store::StoreConfig;
pub use ttl::TtlConfig;
