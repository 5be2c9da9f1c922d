//! JSON body extractor for user payloads.

use aside_core::UserPayload;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};

use crate::error::AppError;

/// Decodes the request body into a [`UserPayload`].
///
/// The body is parsed as JSON whatever the `Content-Type` header says. A
/// malformed body or a non-string `name` is rejected with 400 and the standard
/// error body. A missing `name` decodes to an empty string so the coordinator
/// reports it as a validation failure.
#[derive(Debug)]
pub struct UserBody(pub UserPayload);

impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body(rejection.body_text()))?;

        let payload = serde_json::from_slice::<UserPayload>(&body)
            .map_err(|e| invalid_body(e.to_string()))?;

        Ok(Self(payload))
    }
}

fn invalid_body(reason: String) -> AppError {
    tracing::debug!(error = %reason, "Rejected request body");
    AppError::BadRequest(format!("Invalid request body: {}", reason))
}
