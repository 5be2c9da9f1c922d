use aside_core::ServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    /// Usuario no encontrado
    NotFound(String),

    /// Parametros invalidos
    BadRequest(String),

    /// Error interno
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation { message, .. } => AppError::BadRequest(message),
            ServiceError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "Store failure");
                AppError::Internal("Failed to access user store".to_string())
            },
            ServiceError::Cache(e) => {
                tracing::error!(error = %e, "Cache failure");
                AppError::Internal("Failed to access user cache".to_string())
            },
            // Already logged by the coordinator
            ServiceError::Inconsistent { id, .. } => AppError::Internal(format!(
                "User {} was saved but the cache could not be updated",
                id
            )),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                msg,
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
