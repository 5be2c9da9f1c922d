//! PostgreSQL durable store.

mod config;
mod schema;
mod store;

pub use config::PostgresConfig;
pub use store::PostgresUserStore;
