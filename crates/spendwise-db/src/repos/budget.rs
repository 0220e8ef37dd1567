//! Budget repository
//!
//! `(user_id, category)` is unique. Writes that would create a second budget
//! for a category fail on the constraint instead of overwriting.

use chrono::Utc;
use sqlx::SqlitePool;
use spendwise_types::{Budget, BudgetId, BudgetPatch, NewBudget, UserId};
use tracing::{debug, info};

use crate::models::convert_all;
use crate::{DbBudget, DbError, DbResult};

const BUDGET_COLUMNS: &str = "id, user_id, category, limit_amount, created_at";

pub struct BudgetRepo {
    pool: SqlitePool,
}

impl BudgetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: UserId, budget: &NewBudget) -> DbResult<Budget> {
        let row = sqlx::query_as::<_, DbBudget>(&format!(
            "INSERT INTO budgets (user_id, category, limit_amount, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {BUDGET_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&budget.category)
        .bind(budget.limit.to_string())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DbError::from_write(e, || format!("Budget for category {} already exists", budget.category))
        })?;

        info!(user_id, budget_id = row.id, category = %budget.category, "Budget created");
        row.try_into()
    }

    pub async fn find_by_id(&self, user_id: UserId, id: BudgetId) -> DbResult<Option<Budget>> {
        let row = sqlx::query_as::<_, DbBudget>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Budget::try_from).transpose()
    }

    /// Exact, case-sensitive category lookup
    pub async fn find_by_category(&self, user_id: UserId, category: &str) -> DbResult<Option<Budget>> {
        let row = sqlx::query_as::<_, DbBudget>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE user_id = ? AND category = ?"
        ))
        .bind(user_id)
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Budget::try_from).transpose()
    }

    /// All of the user's budgets in creation order
    pub async fn list(&self, user_id: UserId) -> DbResult<Vec<Budget>> {
        let rows = sqlx::query_as::<_, DbBudget>(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budgets WHERE user_id = ? ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id, count = rows.len(), "Listed budgets");
        convert_all(rows)
    }

    /// Apply a partial update. Renaming onto an existing category yields
    /// [`DbError::Duplicate`].
    pub async fn update(&self, user_id: UserId, id: BudgetId, patch: &BudgetPatch) -> DbResult<Budget> {
        let row = sqlx::query_as::<_, DbBudget>(&format!(
            "UPDATE budgets SET \
                category = COALESCE(?, category), \
                limit_amount = COALESCE(?, limit_amount) \
             WHERE id = ? AND user_id = ? \
             RETURNING {BUDGET_COLUMNS}"
        ))
        .bind(patch.category.as_deref())
        .bind(patch.limit.map(|l| l.to_string()))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DbError::from_write(e, || {
                format!(
                    "Budget for category {} already exists",
                    patch.category.as_deref().unwrap_or_default()
                )
            })
        })?
        .ok_or_else(|| DbError::NotFound(format!("Budget {}", id)))?;

        info!(user_id, budget_id = id, "Budget updated");
        row.try_into()
    }

    pub async fn delete(&self, user_id: UserId, id: BudgetId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Budget {}", id)));
        }

        info!(user_id, budget_id = id, "Budget deleted");
        Ok(())
    }
}
