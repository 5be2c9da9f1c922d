//! # Aside Backends
//!
//! Concrete implementations of the `UserStore` and `UserCache` traits from
//! `aside-core`.
//!
//! ## Adapters
//!
//! - [`PostgresUserStore`]: `users` table with soft-delete, pooled through
//!   `deadpool-postgres`
//! - [`RedisUserCache`]: JSON values in Redis behind a `ConnectionManager`,
//!   keys namespaced with a configurable prefix
//! - [`MemoryUserStore`] and [`MokaUserCache`]: in-process adapters for local
//!   runs, tests and benches
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use aside_backends::{PostgresConfig, PostgresUserStore, RedisConfig, RedisUserCache};
//! use aside_core::{CachePolicy, UserService};
//!
//! let store = PostgresUserStore::from_config(&PostgresConfig::default())?;
//! store.migrate().await?;
//! let cache = RedisUserCache::connect(&RedisConfig::default()).await?;
//!
//! let service = UserService::new(Arc::new(store), Arc::new(cache), CachePolicy::default());
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod redis;

// Re-exports
pub use error::BackendError;
pub use memory::{MemoryUserStore, MokaUserCache};
pub use postgres::{PostgresConfig, PostgresUserStore};
pub use crate::redis::{RedisConfig, RedisUserCache};
