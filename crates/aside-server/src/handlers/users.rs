//! Handlers for the `/users` resource.

use aside_core::{Listing, User};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::{UserBody, UserIdPath};
use crate::state::AppState;

/// POST /users
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    UserBody(payload): UserBody,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users().create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
///
/// Responde 204 sin body cuando no hay usuarios.
#[instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.users().list().await? {
        Listing::Empty => Ok(StatusCode::NO_CONTENT.into_response()),
        Listing::Users(users) => Ok(Json(users).into_response()),
    }
}

/// GET /users/{id}
#[instrument(skip_all, fields(id = %path.id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> Result<Json<User>, AppError> {
    let user = state.users().read(&path.id).await?;
    Ok(Json(user))
}

/// PUT /users/{id}
#[instrument(skip_all, fields(id = %path.id))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
    UserBody(payload): UserBody,
) -> Result<Json<User>, AppError> {
    let user = state.users().update(&path.id, payload).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
#[instrument(skip_all, fields(id = %path.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> Result<StatusCode, AppError> {
    state.users().delete(&path.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
