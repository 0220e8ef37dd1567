//! API Routes
//!
//! Route definitions for all API endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create API v1 routes
pub fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/transactions", transaction_routes())
        .nest("/budgets", budget_routes())
}

/// Authentication routes
fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

/// Transaction routes; static segments take precedence over `/:id`
fn transaction_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::transaction::list_transactions)
                .post(handlers::transaction::create_transaction),
        )
        .route("/stats", get(handlers::stats::get_totals))
        .route("/breakdown", get(handlers::stats::get_category_breakdown))
        .route(
            "/:id",
            get(handlers::transaction::get_transaction)
                .patch(handlers::transaction::update_transaction)
                .delete(handlers::transaction::delete_transaction),
        )
}

/// Budget routes
fn budget_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::budget::list_budgets).post(handlers::budget::create_budget),
        )
        .route("/with-spending", get(handlers::stats::get_budgets_with_spending))
        .route(
            "/:id",
            get(handlers::budget::get_budget)
                .patch(handlers::budget::update_budget)
                .delete(handlers::budget::delete_budget),
        )
}

/// Create Swagger UI routes
pub fn swagger_routes() -> Router<Arc<AppState>> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
