//! Transaction Handlers
//!
//! CRUD over the caller's own income and expense records. Rows owned by
//! another user are reported exactly like missing rows.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use spendwise_db::{DbError, TransactionFilter};
use spendwise_types::TransactionId;
use std::sync::Arc;

use crate::dto::{
    CreateTransactionRequest, TransactionListQuery, TransactionResponse, UpdateTransactionRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RequireAuth, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::state::AppState;

fn not_found_as_transaction(err: DbError) -> ApiError {
    match err {
        DbError::NotFound(_) => ApiError::TransactionNotFound,
        other => ApiError::from(other),
    }
}

/// List transactions, newest first
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "Transactions",
    security(("bearer" = [])),
    params(TransactionListQuery),
    responses(
        (status = 200, description = "Transactions", body = Vec<TransactionResponse>),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedQuery(query): ValidatedQuery<TransactionListQuery>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let filter = TransactionFilter {
        kind: query.kind,
        category: query.category,
        month: query.month,
    };

    let transactions = state
        .db
        .transaction_repo()
        .list(user.user_id, &filter)
        .await?;

    Ok(Json(
        transactions.into_iter().map(TransactionResponse::from).collect(),
    ))
}

/// Record a transaction
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "Transactions",
    security(("bearer" = [])),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Invalid transaction", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let new = request.into_new()?;

    let created = state
        .db
        .transaction_repo()
        .create(user.user_id, &new)
        .await?;

    metrics::counter!("spendwise_transactions_created_total", "kind" => created.kind.as_str())
        .increment(1);

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(created))))
}

/// Fetch one transaction
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction", body = TransactionResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedPath(id): ValidatedPath<TransactionId>,
) -> ApiResult<Json<TransactionResponse>> {
    let tx = state
        .db
        .transaction_repo()
        .find_by_id(user.user_id, id)
        .await?
        .ok_or(ApiError::TransactionNotFound)?;

    Ok(Json(TransactionResponse::from(tx)))
}

/// Partially update a transaction
#[utoipa::path(
    patch,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Transaction id")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Updated transaction", body = TransactionResponse),
        (status = 400, description = "Invalid update", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedPath(id): ValidatedPath<TransactionId>,
    ValidatedJson(request): ValidatedJson<UpdateTransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    let patch = request.into_patch()?;
    let repo = state.db.transaction_repo();

    let updated = if patch.is_empty() {
        repo.find_by_id(user.user_id, id)
            .await?
            .ok_or(ApiError::TransactionNotFound)?
    } else {
        repo.update(user.user_id, id, &patch)
            .await
            .map_err(not_found_as_transaction)?
    };

    Ok(Json(TransactionResponse::from(updated)))
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    ValidatedPath(id): ValidatedPath<TransactionId>,
) -> ApiResult<StatusCode> {
    state
        .db
        .transaction_repo()
        .delete(user.user_id, id)
        .await
        .map_err(not_found_as_transaction)?;

    metrics::counter!("spendwise_transactions_deleted_total").increment(1);

    Ok(StatusCode::NO_CONTENT)
}
