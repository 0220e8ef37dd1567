//! Database error types

use thiserror::Error;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    /// Row is absent or owned by someone else
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// A stored value no longer decodes into a domain type
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl DbError {
    /// Map a unique-constraint failure to [`DbError::Duplicate`], anything
    /// else to [`DbError::Query`].
    pub(crate) fn from_write(e: sqlx::Error, what: impl FnOnce() -> String) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DbError::Duplicate(what());
            }
        }
        DbError::Query(e)
    }
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
