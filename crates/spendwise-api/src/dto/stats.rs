//! Aggregate statistics DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_core::{CategoryTotal, Totals};
use utoipa::ToSchema;

/// All-time totals
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

impl From<Totals> for TotalsResponse {
    fn from(totals: Totals) -> Self {
        Self {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            balance: totals.balance,
        }
    }
}

/// One slice of the monthly expense chart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryAmountResponse {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

impl From<CategoryTotal> for CategoryAmountResponse {
    fn from(entry: CategoryTotal) -> Self {
        Self {
            category: entry.category,
            amount: entry.amount,
        }
    }
}
