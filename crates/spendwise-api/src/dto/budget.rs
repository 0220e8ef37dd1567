//! Budget DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_core::{BudgetSpending, BudgetStatus};
use spendwise_types::{Budget, BudgetPatch, NewBudget};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ApiResult;

/// Create budget request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBudgetRequest {
    #[validate(length(min = 1, max = 100, message = "Category must be 1 to 100 characters"))]
    pub category: String,
    /// Monthly ceiling, non-negative
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 150.0)]
    pub limit: Decimal,
}

impl CreateBudgetRequest {
    pub fn into_new(self) -> ApiResult<NewBudget> {
        Ok(NewBudget::new(self.category, self.limit)?)
    }
}

/// Partial budget update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBudgetRequest {
    #[validate(length(min = 1, max = 100, message = "Category must be 1 to 100 characters"))]
    pub category: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub limit: Option<Decimal>,
}

impl UpdateBudgetRequest {
    pub fn into_patch(self) -> ApiResult<BudgetPatch> {
        Ok(BudgetPatch {
            category: self.category,
            limit: self.limit,
        }
        .validated()?)
    }
}

/// Budget as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BudgetResponse {
    pub id: i64,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub limit: Decimal,
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            category: budget.category,
            limit: budget.limit,
        }
    }
}

/// A budget evaluated against the current month's expenses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BudgetSpendingResponse {
    pub id: i64,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub limit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub remaining: Decimal,
    /// Share of the limit spent, two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 133.33)]
    pub percentage: Decimal,
    /// `on_track`, `warning` or `exceeded`
    #[schema(value_type = String, example = "on_track")]
    pub status: BudgetStatus,
}

impl From<BudgetSpending> for BudgetSpendingResponse {
    fn from(entry: BudgetSpending) -> Self {
        Self {
            id: entry.id,
            category: entry.category,
            limit: entry.limit,
            spent: entry.spent,
            remaining: entry.remaining,
            percentage: entry.percentage,
            status: entry.status,
        }
    }
}
