//! Aside Server - HTTP surface for the cache-aside user service
//!
//! Exposes [`aside_core::UserService`] over axum: the `/users` resource,
//! `/health` and `/metrics`. Settings come from [`Settings::load`].

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use handlers::health::{HealthResponse, Status};
pub use server::{create_router_with_state, run_server_with_state};
pub use settings::{BackendMode, ServerSettings, Settings, SettingsError};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
