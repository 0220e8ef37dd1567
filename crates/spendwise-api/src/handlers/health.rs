//! Health Check Handlers
//!
//! Endpoints for service health monitoring.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::dto::{ComponentStatus, HealthResponse, ReadinessResponse};
use crate::state::AppState;

/// Health check endpoint
///
/// Returns 200 if the service is running.
/// This is a lightweight check that doesn't verify dependencies.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// Readiness check endpoint
///
/// Returns 200 once the database answers a ping, 503 otherwise.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let started = Instant::now();

    let database = match state.db.health_check().await {
        Ok(health) if health.healthy => ComponentStatus {
            name: "SQLite".to_string(),
            status: "healthy".to_string(),
            latency_ms: Some(started.elapsed().as_millis() as u64),
            error: None,
        },
        Ok(_) => ComponentStatus {
            name: "SQLite".to_string(),
            status: "unhealthy".to_string(),
            latency_ms: None,
            error: Some("SQLite health check failed".to_string()),
        },
        Err(e) => ComponentStatus {
            name: "SQLite".to_string(),
            status: "unhealthy".to_string(),
            latency_ms: None,
            error: Some(e.to_string()),
        },
    };

    let ready = database.status == "healthy";
    let status_code = if ready {
        StatusCode::OK
    } else {
        tracing::warn!(error = ?database.error, "Readiness check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            database,
        }),
    )
}
