//! Errors raised while constructing adapters.
//!
//! Failures during normal operation are reported through `StoreError` and
//! `CacheError` from `aside-core`.

/// Errors that can occur while connecting a backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The PostgreSQL pool could not be built from its configuration.
    #[error("failed to create postgres pool: {0}")]
    Pool(#[from] deadpool_postgres::CreatePoolError),

    /// The Redis client could not be created or connected.
    #[error("redis connection failed: {0}")]
    Redis(#[from] ::redis::RedisError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BackendError {
    /// Creates a new invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
