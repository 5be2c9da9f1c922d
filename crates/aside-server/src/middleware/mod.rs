//! Middleware de logging y request id para el servidor HTTP.
//!
//! `server.rs` arma el stack con layers de `tower-http`, de afuera hacia adentro:
//! - `SetRequestIdLayer`: genera X-Request-Id (uuid v4) si el cliente no lo envia
//! - `TraceLayer`: span por request usando las funciones de este modulo
//! - `PropagateRequestIdLayer`: copia X-Request-Id a la respuesta

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, Response},
};
use tracing::{Span, info, info_span};

/// Header name for request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Span with request context. The id is already set by `SetRequestIdLayer`.
pub fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    info!("Request started");
}

pub fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    info!(
        status = response.status().as_u16(),
        duration_ms = latency.as_millis() as u64,
        "Request completed"
    );
}
