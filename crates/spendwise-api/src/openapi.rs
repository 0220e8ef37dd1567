//! OpenAPI Documentation
//!
//! Generated OpenAPI 3.0 document for the Spendwise API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// Spendwise API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Spendwise API",
        description = "Personal finance tracker: income and expense records, per-category monthly budgets and spending statistics.",
        version = "0.1.0",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    paths(
        // Health
        handlers::health::health_check,
        handlers::health::readiness_check,
        // Auth
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        // Transactions
        handlers::transaction::list_transactions,
        handlers::transaction::create_transaction,
        handlers::transaction::get_transaction,
        handlers::transaction::update_transaction,
        handlers::transaction::delete_transaction,
        // Budgets
        handlers::budget::list_budgets,
        handlers::budget::create_budget,
        handlers::budget::get_budget,
        handlers::budget::update_budget,
        handlers::budget::delete_budget,
        // Statistics
        handlers::stats::get_totals,
        handlers::stats::get_category_breakdown,
        handlers::stats::get_budgets_with_spending,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            dto::HealthResponse,
            dto::ReadinessResponse,
            dto::ComponentStatus,
            // Auth
            dto::RegisterRequest,
            dto::LoginRequest,
            dto::AuthResponse,
            dto::UserInfo,
            // Transactions
            dto::CreateTransactionRequest,
            dto::UpdateTransactionRequest,
            dto::TransactionResponse,
            // Budgets
            dto::CreateBudgetRequest,
            dto::UpdateBudgetRequest,
            dto::BudgetResponse,
            dto::BudgetSpendingResponse,
            // Statistics
            dto::TotalsResponse,
            dto::CategoryAmountResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Authentication", description = "Registration, login and current user"),
        (name = "Transactions", description = "Income and expense records"),
        (name = "Budgets", description = "Per-category monthly budgets"),
        (name = "Statistics", description = "Totals, category breakdown and budget spending")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security scheme modifier
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Get the OpenAPI JSON document
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
