//! Transaction DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_types::{
    NewTransaction, Transaction, TransactionKind, TransactionPatch, YearMonth,
};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ApiResult;

// =============================================================================
// Requests
// =============================================================================

/// Create transaction request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    /// `income` or `expense`
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "expense")]
    pub kind: TransactionKind,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
    /// Non-negative amount, rounded to 2 decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 49.99)]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 100, message = "Category must be 1 to 100 characters"))]
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl CreateTransactionRequest {
    pub fn into_new(self) -> ApiResult<NewTransaction> {
        Ok(NewTransaction::new(
            self.kind,
            self.description,
            self.amount,
            self.category,
            self.date,
        )?)
    }
}

/// Partial transaction update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionRequest {
    #[serde(default, rename = "type")]
    #[schema(value_type = Option<String>)]
    pub kind: Option<TransactionKind>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    #[validate(length(min = 1, max = 100, message = "Category must be 1 to 100 characters"))]
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl UpdateTransactionRequest {
    pub fn into_patch(self) -> ApiResult<TransactionPatch> {
        Ok(TransactionPatch {
            kind: self.kind,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
        .validated()?)
    }
}

/// Listing filters
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionListQuery {
    /// Only `income` or only `expense`
    #[serde(default, rename = "type")]
    #[param(value_type = Option<String>)]
    pub kind: Option<TransactionKind>,
    /// Exact category match
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    /// `YYYY-MM`
    #[param(value_type = Option<String>, example = "2024-01")]
    pub month: Option<YearMonth>,
}

// =============================================================================
// Responses
// =============================================================================

/// Transaction as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "expense")]
    pub kind: TransactionKind,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind,
            description: tx.description,
            amount: tx.amount,
            category: tx.category,
            date: tx.date,
        }
    }
}
