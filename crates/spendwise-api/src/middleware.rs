//! API Middleware
//!
//! Middleware components for the API layer.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Requests slower than this are logged at warn level
const SLOW_REQUEST_MS: u128 = 1000;

/// Request timing middleware
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    metrics::counter!(
        "spendwise_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("spendwise_http_request_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());

    if elapsed.as_millis() > SLOW_REQUEST_MS {
        tracing::warn!(
            method = %method,
            uri = %uri,
            elapsed_ms = elapsed.as_millis(),
            status,
            "Slow request detected"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            elapsed_ms = elapsed.as_millis(),
            status,
            "Request completed"
        );
    }

    response
}
