//! Spendwise Database Layer
//!
//! SQLite persistence for users, transactions and budgets.
//!
//! # Repository Pattern
//!
//! Each table has its own repository. Transaction and budget repositories
//! take the owning user's id on every call: a row owned by another user is
//! indistinguishable from a missing one.

pub mod config;
pub mod error;
pub mod models;
pub mod repos;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub use config::DatabaseConfig;
pub use error::{DbError, DbResult};
pub use models::*;
pub use repos::*;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the configured SQLite database
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!("Connecting to SQLite: {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?;

        info!("Connected to SQLite");
        Ok(Self { pool })
    }

    /// Fresh migrated in-memory database.
    ///
    /// The pool is pinned to one connection that never expires, since every
    /// SQLite in-memory connection is its own database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> DbResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        info!("Migrations complete");
        Ok(())
    }

    /// Ping the database
    pub async fn health_check(&self) -> DbResult<HealthStatus> {
        let healthy = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok();

        Ok(HealthStatus {
            database: healthy,
            healthy,
        })
    }

    pub fn user_repo(&self) -> UserRepo {
        UserRepo::new(self.pool.clone())
    }

    pub fn transaction_repo(&self) -> TransactionRepo {
        TransactionRepo::new(self.pool.clone())
    }

    pub fn budget_repo(&self) -> BudgetRepo {
        BudgetRepo::new(self.pool.clone())
    }
}

/// Health status of the database connection
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub database: bool,
    pub healthy: bool,
}
