use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    fn of<E>(result: &Result<(), E>) -> Self {
        if result.is_ok() { Self::Up } else { Self::Down }
    }
}

#[derive(Debug, Serialize)]
pub struct Components {
    pub store: Status,
    pub cache: Status,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Status,
    pub components: Components,
}

impl HealthResponse {
    pub fn new(store: Status, cache: Status) -> Self {
        let status = if store == Status::Up && cache == Status::Up {
            Status::Up
        } else {
            Status::Down
        };

        Self {
            status,
            components: Components { store, cache },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.status {
            Status::Up => StatusCode::OK,
            Status::Down => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Pings the store and the cache concurrently.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let users = state.users();
    let (store, cache) = tokio::join!(users.store().health_check(), users.cache().health_check());

    if let Err(e) = &store {
        tracing::warn!(store = users.store().name(), error = %e, "Store health check failed");
    }
    if let Err(e) = &cache {
        tracing::warn!(cache = users.cache().name(), error = %e, "Cache health check failed");
    }

    let response = HealthResponse::new(Status::of(&store), Status::of(&cache));
    (response.status_code(), Json(response))
}
