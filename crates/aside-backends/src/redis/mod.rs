//! Redis cache.

mod cache;
mod config;

pub use cache::RedisUserCache;
pub use config::RedisConfig;
