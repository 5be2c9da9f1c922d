//! Metrics for the HTTP surface and the cache.

pub mod cache;
pub mod http;
pub mod setup;

pub use cache::{CacheMetrics, MeteredCache};
pub use setup::init_metrics;
