//! Statistics Handlers
//!
//! Read-only views computed by the aggregation engine from freshly fetched
//! rows. The reference month is taken from the application clock once per
//! request.

use axum::{extract::State, Json};
use spendwise_core::{budgets_with_spending, category_breakdown, compute_totals};
use spendwise_db::TransactionFilter;
use std::sync::Arc;

use crate::dto::{BudgetSpendingResponse, CategoryAmountResponse, TotalsResponse};
use crate::error::ApiResult;
use crate::extractors::RequireAuth;
use crate::state::AppState;

/// All-time income, expense and balance
#[utoipa::path(
    get,
    path = "/api/v1/transactions/stats",
    tag = "Statistics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Totals", body = TotalsResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_totals(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<TotalsResponse>> {
    let transactions = state
        .db
        .transaction_repo()
        .list(user.user_id, &TransactionFilter::default())
        .await?;

    Ok(Json(TotalsResponse::from(compute_totals(&transactions))))
}

/// Current-month expenses per category, in first-seen order
#[utoipa::path(
    get,
    path = "/api/v1/transactions/breakdown",
    tag = "Statistics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Category breakdown", body = Vec<CategoryAmountResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category_breakdown(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<Vec<CategoryAmountResponse>>> {
    let month = state.clock.current_month();
    let expenses = state.db.transaction_repo().list_expenses(user.user_id).await?;

    let breakdown = category_breakdown(&expenses, month);
    tracing::debug!(user_id = user.user_id, %month, categories = breakdown.len(), "Computed breakdown");

    Ok(Json(
        breakdown
            .entries
            .into_iter()
            .map(CategoryAmountResponse::from)
            .collect(),
    ))
}

/// Every budget evaluated against the current month's expenses
#[utoipa::path(
    get,
    path = "/api/v1/budgets/with-spending",
    tag = "Statistics",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Budgets with spending", body = Vec<BudgetSpendingResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_budgets_with_spending(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<Vec<BudgetSpendingResponse>>> {
    let month = state.clock.current_month();

    let budgets = state.db.budget_repo().list(user.user_id).await?;
    let filter = TransactionFilter {
        kind: Some(spendwise_types::TransactionKind::Expense),
        category: None,
        month: Some(month),
    };
    let expenses = state.db.transaction_repo().list(user.user_id, &filter).await?;

    Ok(Json(
        budgets_with_spending(&budgets, &expenses, month)
            .into_iter()
            .map(BudgetSpendingResponse::from)
            .collect(),
    ))
}
