//! Aside Core - cache-aside coordination for user records
//!
//! This crate holds the record model, the capability traits for the durable
//! store and the cache, and [`UserService`], the coordinator that applies the
//! cache-aside policy over them. Concrete adapters live in `aside-backends`.

pub mod cache;
pub mod error;
pub mod key;
pub mod model;
pub mod service;
pub mod store;

// Re-exports
pub use cache::UserCache;
pub use error::{CacheError, ServiceError, StoreError};
pub use key::CacheKey;
pub use model::{User, UserFields, UserId, UserPayload};
pub use service::{CachePolicy, Listing, PopulateFailure, UserService};
pub use store::UserStore;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
