//! HTTP handlers.

pub mod health;
pub mod users;

use axum::{extract::State, http::StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;

/// GET /metrics, en formato de texto Prometheus.
pub async fn metrics_handler(State(prometheus): State<PrometheusHandle>) -> String {
    prometheus.render()
}

/// Respuesta para rutas no registradas.
pub async fn route_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "route not found")
}
