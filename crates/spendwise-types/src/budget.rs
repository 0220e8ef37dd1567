//! Budget types
//!
//! A budget is a per-category monthly spending ceiling. There is a single
//! current limit per `(user, category)`; it applies to every month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::validate_category;
use crate::{normalize_amount, BudgetId, Result, UserId};

/// A stored budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: UserId,
    /// Matched exactly against transaction categories
    pub category: String,
    /// Monthly ceiling, non-negative
    pub limit: Decimal,
}

/// Validated input for a new budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    pub category: String,
    pub limit: Decimal,
}

impl NewBudget {
    pub fn new(category: impl Into<String>, limit: Decimal) -> Result<Self> {
        Ok(Self {
            category: validate_category(category.into())?,
            limit: normalize_amount(limit)?,
        })
    }
}

/// Partial update of a budget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub limit: Option<Decimal>,
}

impl BudgetPatch {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            category: self.category.map(validate_category).transpose()?,
            limit: self.limit.map(normalize_amount).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.limit.is_none()
    }
}
