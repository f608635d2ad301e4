//! Use Cases
//!
//! Cache-aside read strategies and the policies they share.

pub mod cache_client;
pub mod retry;
pub mod stats;

pub use cache_client::{CacheClient, CacheClientConfig};
pub use retry::RetryPolicy;
pub use stats::ClientStats;
