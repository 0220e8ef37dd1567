//! Aggregation engine
//!
//! All functions here are pure and total. Amounts are summed as [`Decimal`]
//! so `total_income - total_expense == balance` holds exactly.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use spendwise_types::{Budget, BudgetId, Transaction, YearMonth};

/// Share of the limit at which a budget is flagged as a warning
pub const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Totals
// =============================================================================

/// All-time income and expense totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Sum every transaction by kind. No date filtering is applied.
///
/// Sums saturate at [`Decimal::MAX`] rather than overflow.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let (total_income, total_expense) =
        transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), tx| {
                if tx.is_income() {
                    (income.saturating_add(tx.amount), expense)
                } else {
                    (income, expense.saturating_add(tx.amount))
                }
            });

    Totals {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
    }
}

// =============================================================================
// Budgets with spending
// =============================================================================

/// How a budget stands against its month's spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

/// A budget together with what was spent against it in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSpending {
    pub id: BudgetId,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// `limit - spent`, floored at zero
    pub remaining: Decimal,
    /// `spent / limit * 100`, two decimal places
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// Expense total for `category` within `month`.
///
/// Category comparison is exact: no case folding, no trimming.
pub fn spent_in_month(transactions: &[Transaction], category: &str, month: YearMonth) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.is_expense() && tx.category == category && month.contains(tx.date))
        .fold(Decimal::ZERO, |acc, tx| acc.saturating_add(tx.amount))
}

/// Percentage of `limit` consumed by `spent`.
///
/// A non-positive limit yields 0 when nothing was spent and saturates at
/// exactly 100 otherwise.
pub fn spending_percentage(spent: Decimal, limit: Decimal) -> Decimal {
    if limit <= Decimal::ZERO {
        return if spent.is_zero() { Decimal::ZERO } else { HUNDRED };
    }
    spent
        .checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(limit))
        .unwrap_or(Decimal::MAX)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn budget_status(spent: Decimal, limit: Decimal, percentage: Decimal) -> BudgetStatus {
    if spent > Decimal::ZERO && (limit <= Decimal::ZERO || percentage >= HUNDRED) {
        BudgetStatus::Exceeded
    } else if percentage >= WARNING_THRESHOLD {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    }
}

/// Evaluate each budget against the month's expenses, preserving input order.
pub fn budgets_with_spending(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: YearMonth,
) -> Vec<BudgetSpending> {
    budgets
        .iter()
        .map(|budget| {
            let spent = spent_in_month(transactions, &budget.category, month);
            let percentage = spending_percentage(spent, budget.limit);
            BudgetSpending {
                id: budget.id,
                category: budget.category.clone(),
                limit: budget.limit,
                spent,
                remaining: budget.limit.saturating_sub(spent).max(Decimal::ZERO),
                percentage,
                status: budget_status(spent, budget.limit, percentage),
            }
        })
        .collect()
}

// =============================================================================
// Category breakdown
// =============================================================================

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Per-category expense totals in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|entry| entry.amount).sum()
    }
}

/// Sum the month's expenses per category.
///
/// Categories whose total is zero are left out.
pub fn category_breakdown(transactions: &[Transaction], month: YearMonth) -> CategoryBreakdown {
    let mut entries: Vec<CategoryTotal> = Vec::new();

    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && month.contains(tx.date))
    {
        match entries.iter_mut().find(|entry| entry.category == tx.category) {
            Some(entry) => entry.amount += tx.amount,
            None => entries.push(CategoryTotal {
                category: tx.category.clone(),
                amount: tx.amount,
            }),
        }
    }

    entries.retain(|entry| !entry.amount.is_zero());
    CategoryBreakdown { entries }
}
