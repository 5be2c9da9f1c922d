//! In-process adapters.
//!
//! Both hold their data in the process and lose it on restart. They follow
//! the same contracts as the PostgreSQL and Redis adapters (soft-delete,
//! idempotent cache delete, no expiration).

mod cache;
mod store;

pub use cache::MokaUserCache;
pub use store::MemoryUserStore;
