//! Budget Handlers
//!
//! Per-category monthly ceilings. At most one budget per category per user.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use spendwise_db::DbError;
use spendwise_types::BudgetId;
use std::sync::Arc;

use crate::dto::{BudgetResponse, CreateBudgetRequest, UpdateBudgetRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RequireAuth, ValidatedJson, ValidatedPath};
use crate::state::AppState;

fn map_budget_error(err: DbError, category: Option<&str>) -> ApiError {
    match err {
        DbError::NotFound(_) => ApiError::BudgetNotFound,
        DbError::Duplicate(msg) => {
            ApiError::BudgetAlreadyExists(category.map(str::to_string).unwrap_or(msg))
        }
        other => ApiError::from(other),
    }
}

/// List the caller's budgets
#[utoipa::path(
    get,
    path = "/api/v1/budgets",
    tag = "Budgets",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Budgets", body = Vec<BudgetResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let budgets = state.db.budget_repo().list(user.user_id).await?;
    Ok(Json(budgets.into_iter().map(BudgetResponse::from).collect()))
}

/// Create a budget
#[utoipa::path(
    post,
    path = "/api/v1/budgets",
    tag = "Budgets",
    security(("bearer" = [])),
    request_body = CreateBudgetRequest,
    responses(
        (status = 201, description = "Budget created", body = BudgetResponse),
        (status = 400, description = "Invalid budget", body = crate::error::ErrorResponse),
        (status = 409, description = "Category already budgeted", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedJson(request): ValidatedJson<CreateBudgetRequest>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    let new = request.into_new()?;

    let created = state
        .db
        .budget_repo()
        .create(user.user_id, &new)
        .await
        .map_err(|e| map_budget_error(e, Some(&new.category)))?;

    metrics::counter!("spendwise_budgets_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(BudgetResponse::from(created))))
}

/// Fetch one budget
#[utoipa::path(
    get,
    path = "/api/v1/budgets/{id}",
    tag = "Budgets",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Budget id")),
    responses(
        (status = 200, description = "Budget", body = BudgetResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedPath(id): ValidatedPath<BudgetId>,
) -> ApiResult<Json<BudgetResponse>> {
    let budget = state
        .db
        .budget_repo()
        .find_by_id(user.user_id, id)
        .await?
        .ok_or(ApiError::BudgetNotFound)?;

    Ok(Json(BudgetResponse::from(budget)))
}

/// Rename a budget or change its limit
#[utoipa::path(
    patch,
    path = "/api/v1/budgets/{id}",
    tag = "Budgets",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Budget id")),
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Updated budget", body = BudgetResponse),
        (status = 400, description = "Invalid update", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Category already budgeted", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedPath(id): ValidatedPath<BudgetId>,
    ValidatedJson(request): ValidatedJson<UpdateBudgetRequest>,
) -> ApiResult<Json<BudgetResponse>> {
    let patch = request.into_patch()?;
    let repo = state.db.budget_repo();

    let updated = if patch.is_empty() {
        repo.find_by_id(user.user_id, id)
            .await?
            .ok_or(ApiError::BudgetNotFound)?
    } else {
        repo.update(user.user_id, id, &patch)
            .await
            .map_err(|e| map_budget_error(e, patch.category.as_deref()))?
    };

    Ok(Json(BudgetResponse::from(updated)))
}

/// Delete a budget
#[utoipa::path(
    delete,
    path = "/api/v1/budgets/{id}",
    tag = "Budgets",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Budget id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedPath(id): ValidatedPath<BudgetId>,
) -> ApiResult<StatusCode> {
    state
        .db
        .budget_repo()
        .delete(user.user_id, id)
        .await
        .map_err(|e| map_budget_error(e, None))?;

    metrics::counter!("spendwise_budgets_deleted_total").increment(1);

    Ok(StatusCode::NO_CONTENT)
}
