//! Transaction repository
//!
//! Every query is scoped by `user_id`.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use spendwise_types::{
    NewTransaction, Transaction, TransactionId, TransactionKind, TransactionPatch, UserId,
    YearMonth,
};
use tracing::{debug, info};

use crate::models::convert_all;
use crate::{DbError, DbResult, DbTransaction};

const TX_COLUMNS: &str = "id, user_id, kind, description, amount, category, date, created_at";

/// Optional narrowing of a transaction listing
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    /// Exact, case-sensitive match
    pub category: Option<String>,
    pub month: Option<YearMonth>,
}

pub struct TransactionRepo {
    pool: SqlitePool,
}

impl TransactionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: UserId, tx: &NewTransaction) -> DbResult<Transaction> {
        let row = sqlx::query_as::<_, DbTransaction>(&format!(
            "INSERT INTO transactions (user_id, kind, description, amount, category, date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {TX_COLUMNS}"
        ))
        .bind(user_id)
        .bind(tx.kind.as_str())
        .bind(&tx.description)
        .bind(tx.amount.to_string())
        .bind(&tx.category)
        .bind(tx.date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(user_id, transaction_id = row.id, kind = %tx.kind, "Transaction created");
        row.try_into()
    }

    pub async fn find_by_id(&self, user_id: UserId, id: TransactionId) -> DbResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, DbTransaction>(&format!(
            "SELECT {TX_COLUMNS} FROM transactions WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Transaction::try_from).transpose()
    }

    /// List the user's transactions, newest date first
    pub async fn list(&self, user_id: UserId, filter: &TransactionFilter) -> DbResult<Vec<Transaction>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {TX_COLUMNS} FROM transactions WHERE user_id = "));
        qb.push_bind(user_id);

        if let Some(kind) = filter.kind {
            qb.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(category) = &filter.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(month) = filter.month {
            qb.push(" AND date >= ").push_bind(month.first_day());
            if let Some(next) = month.succ() {
                qb.push(" AND date < ").push_bind(next.first_day());
            }
        }
        qb.push(" ORDER BY date DESC, id DESC");

        let rows = qb
            .build_query_as::<DbTransaction>()
            .fetch_all(&self.pool)
            .await?;

        debug!(user_id, count = rows.len(), "Listed transactions");
        convert_all(rows)
    }

    /// All of the user's expense transactions, any date
    pub async fn list_expenses(&self, user_id: UserId) -> DbResult<Vec<Transaction>> {
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        };
        self.list(user_id, &filter).await
    }

    /// Apply a partial update. Absent or foreign rows yield [`DbError::NotFound`].
    pub async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> DbResult<Transaction> {
        let row = sqlx::query_as::<_, DbTransaction>(&format!(
            "UPDATE transactions SET \
                kind = COALESCE(?, kind), \
                description = COALESCE(?, description), \
                amount = COALESCE(?, amount), \
                category = COALESCE(?, category), \
                date = COALESCE(?, date) \
             WHERE id = ? AND user_id = ? \
             RETURNING {TX_COLUMNS}"
        ))
        .bind(patch.kind.map(|k| k.as_str()))
        .bind(patch.description.as_deref())
        .bind(patch.amount.map(|a| a.to_string()))
        .bind(patch.category.as_deref())
        .bind(patch.date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Transaction {}", id)))?;

        info!(user_id, transaction_id = id, "Transaction updated");
        row.try_into()
    }

    /// Delete a transaction. Absent or foreign rows yield [`DbError::NotFound`].
    pub async fn delete(&self, user_id: UserId, id: TransactionId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("Transaction {}", id)));
        }

        info!(user_id, transaction_id = id, "Transaction deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::test_support::db_with_users;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn new_tx(kind: TransactionKind, amount: Decimal, category: &str, date: (i32, u32, u32)) -> NewTransaction {
        NewTransaction::new(
            kind,
            format!("{} item", category),
            amount,
            category,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (db, alice, _) = db_with_users().await;
        let repo = db.transaction_repo();

        let created = repo
            .create(alice, &new_tx(TransactionKind::Expense, dec!(200), "Food", (2024, 1, 10)))
            .await
            .unwrap();
        assert_eq!(created.user_id, alice);
        assert_eq!(created.amount.to_string(), "200.00");

        let found = repo.find_by_id(alice, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_other_user_cannot_see_row() {
        let (db, alice, bob) = db_with_users().await;
        let repo = db.transaction_repo();

        let created = repo
            .create(alice, &new_tx(TransactionKind::Income, dec!(1000), "Salary", (2024, 1, 5)))
            .await
            .unwrap();

        assert!(repo.find_by_id(bob, created.id).await.unwrap().is_none());
        assert!(repo.list(bob, &TransactionFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_foreign_row_is_not_found() {
        let (db, alice, bob) = db_with_users().await;
        let repo = db.transaction_repo();

        let created = repo
            .create(alice, &new_tx(TransactionKind::Expense, dec!(50), "Food", (2024, 2, 1)))
            .await
            .unwrap();

        let err = repo.delete(bob, created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));

        let still_there = repo.find_by_id(alice, created.id).await.unwrap().unwrap();
        assert_eq!(still_there, created);

        repo.delete(alice, created.id).await.unwrap();
        assert!(repo.find_by_id(alice, created.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(alice, created.id).await, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_order_and_filters() {
        let (db, alice, _) = db_with_users().await;
        let repo = db.transaction_repo();

        repo.create(alice, &new_tx(TransactionKind::Income, dec!(1000), "Salary", (2024, 1, 5)))
            .await
            .unwrap();
        repo.create(alice, &new_tx(TransactionKind::Expense, dec!(200), "Food", (2024, 1, 10)))
            .await
            .unwrap();
        repo.create(alice, &new_tx(TransactionKind::Expense, dec!(50), "Food", (2024, 2, 1)))
            .await
            .unwrap();
        repo.create(alice, &new_tx(TransactionKind::Expense, dec!(9), "Transport", (2024, 1, 31)))
            .await
            .unwrap();

        let all = repo.list(alice, &TransactionFilter::default()).await.unwrap();
        let dates: Vec<_> = all.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-02-01", "2024-01-31", "2024-01-10", "2024-01-05"]);

        let january = TransactionFilter {
            month: Some(YearMonth::new(2024, 1).unwrap()),
            ..Default::default()
        };
        assert_eq!(repo.list(alice, &january).await.unwrap().len(), 3);

        let food = TransactionFilter {
            category: Some("Food".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.list(alice, &food).await.unwrap().len(), 2);

        let lowercase = TransactionFilter {
            category: Some("food".to_string()),
            ..Default::default()
        };
        assert!(repo.list(alice, &lowercase).await.unwrap().is_empty());

        let expenses = repo.list_expenses(alice).await.unwrap();
        assert_eq!(expenses.len(), 3);
        assert!(expenses.iter().all(|t| t.is_expense()));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let (db, alice, bob) = db_with_users().await;
        let repo = db.transaction_repo();

        let created = repo
            .create(alice, &new_tx(TransactionKind::Expense, dec!(20), "Food", (2024, 1, 10)))
            .await
            .unwrap();

        let patch = TransactionPatch {
            amount: Some(dec!(25.5)),
            category: Some("Dining".to_string()),
            ..Default::default()
        }
        .validated()
        .unwrap();

        let updated = repo.update(alice, created.id, &patch).await.unwrap();
        assert_eq!(updated.amount, dec!(25.50));
        assert_eq!(updated.category, "Dining");
        assert_eq!(updated.kind, TransactionKind::Expense);
        assert_eq!(updated.date, created.date);

        let err = repo.update(bob, created.id, &patch).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }
}
