//! HTTP metrics middleware.

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Label for requests that matched no route, so scanners cannot blow up
/// label cardinality.
const UNMATCHED_PATH: &str = "unmatched";

/// Middleware que registra metricas HTTP para cada request.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    gauge!("aside_http_requests_in_flight").increment(1.0);
    let response = next.run(request).await;
    gauge!("aside_http_requests_in_flight").decrement(1.0);

    let status = response.status().as_u16().to_string();
    let duration = start.elapsed();

    counter!(
        "aside_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "aside_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration.as_secs_f64());

    response
}

/// Registra las metricas HTTP
pub fn register_http_metrics() {
    metrics::describe_counter!("aside_http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "aside_http_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request duration in seconds"
    );
    metrics::describe_gauge!(
        "aside_http_requests_in_flight",
        "Requests currently being served"
    );
}
