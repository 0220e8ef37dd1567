//! Database models - mapped from SQLite tables
//!
//! Amounts are stored as scale-2 decimal text and decoded on the way out.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use spendwise_types::{parse_amount, Budget, Transaction, User};

use crate::DbError;

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        User {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

// ============================================================================
// Transaction Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct DbTransaction {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbTransaction> for Transaction {
    type Error = DbError;

    fn try_from(row: DbTransaction) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt =
            move |e: spendwise_types::DomainError| DbError::Corrupt(format!("transaction {}: {}", id, e));
        Ok(Transaction {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind.parse().map_err(corrupt)?,
            amount: parse_amount(&row.amount).map_err(corrupt)?,
            description: row.description,
            category: row.category,
            date: row.date,
        })
    }
}

// ============================================================================
// Budget Models
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct DbBudget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub limit_amount: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbBudget> for Budget {
    type Error = DbError;

    fn try_from(row: DbBudget) -> Result<Self, Self::Error> {
        let limit = parse_amount(&row.limit_amount)
            .map_err(|e| DbError::Corrupt(format!("budget {}: {}", row.id, e)))?;
        Ok(Budget {
            id: row.id,
            user_id: row.user_id,
            category: row.category,
            limit,
        })
    }
}

/// Convert a batch of rows, failing on the first corrupt one
pub(crate) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, DbError>
where
    T: TryFrom<R, Error = DbError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use spendwise_types::TransactionKind;

    fn row(kind: &str, amount: &str) -> DbTransaction {
        DbTransaction {
            id: 4,
            user_id: 1,
            kind: kind.to_string(),
            description: "lunch".to_string(),
            amount: amount.to_string(),
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_transaction_row_decodes() {
        let tx = Transaction::try_from(row("expense", "12.50")).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.amount, dec!(12.50));
    }

    #[test]
    fn test_corrupt_rows_rejected() {
        assert!(matches!(
            Transaction::try_from(row("transfer", "1.00")),
            Err(DbError::Corrupt(_))
        ));
        assert!(matches!(
            Transaction::try_from(row("income", "lots")),
            Err(DbError::Corrupt(_))
        ));
    }
}
