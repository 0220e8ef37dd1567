//! Spendwise REST API
//!
//! JSON over HTTP for the personal finance tracker. Every data route is
//! scoped to the caller identified by a bearer token.
//!
//! # API Structure
//!
//! ```text
//! /api/v1/
//! ├── /auth          - register, login, me
//! ├── /transactions  - CRUD, /stats totals, /breakdown per category
//! └── /budgets       - CRUD, /with-spending for the current month
//! /health, /ready    - liveness and readiness
//! /swagger-ui        - OpenAPI browser
//! ```

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use http::{HeaderName, Method};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable CORS for browser clients
    pub enable_cors: bool,
    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
    /// Enable response compression
    pub enable_compression: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_compression: true,
            enable_tracing: true,
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let auth_layer = state.auth.layer();

    let mut router = Router::new()
        // API v1 routes
        .nest("/api/v1", routes::api_v1_routes())
        // Health check at root
        .route("/health", axum::routing::get(handlers::health::health_check))
        .route("/ready", axum::routing::get(handlers::health::readiness_check))
        // OpenAPI documentation
        .merge(routes::swagger_routes())
        .with_state(state)
        // Bearer tokens resolved for every route; handlers decide if required
        .layer(auth_layer)
        .layer(axum::middleware::from_fn(middleware::timing_middleware));

    // Add tracing
    if config.enable_tracing {
        router = router.layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ));
    }

    // Request id is set outside the trace span so the span can record it
    let x_request_id = HeaderName::from_static("x-request-id");
    router = router
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    // Add compression
    if config.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    // Add CORS
    if config.enable_cors {
        let cors = if config.cors_origins.iter().any(|o| o == "*") {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(
                    config
                        .cors_origins
                        .iter()
                        .filter_map(|o| o.parse().ok())
                        .collect::<Vec<_>>(),
                )
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any)
        };
        router = router.layer(cors);
    }

    router
}
