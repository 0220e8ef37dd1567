//! User repository

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::{DbError, DbResult, DbUser};

const USER_COLUMNS: &str = "id, email, password_hash, name, created_at";

/// User repository for registration and login lookups
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user. A taken email yields [`DbError::Duplicate`].
    pub async fn create(&self, email: &str, password_hash: &str, name: &str) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "INSERT INTO users (email, password_hash, name, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from_write(e, || format!("Email {} already exists", email)))?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
