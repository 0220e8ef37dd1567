//! API error handling
//!
//! Every failure leaves the API as `{code, msg}` with a stable numeric code.
//! Storage faults are logged and reported without their cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use spendwise_auth::AuthError;
use spendwise_db::DbError;
use spendwise_types::DomainError;
use thiserror::Error;
use utoipa::ToSchema;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Authentication Errors (-1000 to -1099)
    // =========================================================================
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password too weak: {0}")]
    PasswordTooWeak(String),

    // =========================================================================
    // Request Errors (-1100 to -1199)
    // =========================================================================
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Resource Errors (-2000 to -2099)
    // =========================================================================
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Budget not found")]
    BudgetNotFound,

    #[error("User not found")]
    UserNotFound,

    // =========================================================================
    // Conflict Errors (-3000 to -3099)
    // =========================================================================
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("A budget for category {0} already exists")]
    BudgetAlreadyExists(String),

    // =========================================================================
    // Internal Errors (-5000 to -5099)
    // =========================================================================
    #[error("Internal server error")]
    InternalError,

    #[error("Database error")]
    DatabaseError,
}

impl ApiError {
    pub fn error_code(&self) -> i32 {
        match self {
            Self::Unauthorized => -1010,
            Self::InvalidCredentials => -1011,
            Self::PasswordTooWeak(_) => -1012,

            Self::BadRequest(_) => -1101,
            Self::ValidationError(_) => -1102,

            Self::NotFound(_) => -2000,
            Self::TransactionNotFound => -2001,
            Self::BudgetNotFound => -2002,
            Self::UserNotFound => -2003,

            Self::Conflict(_) => -3000,
            Self::EmailAlreadyExists => -3001,
            Self::BudgetAlreadyExists(_) => -3002,

            Self::InternalError => -5000,
            Self::DatabaseError => -5002,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PasswordTooWeak(_)
            | Self::BadRequest(_)
            | Self::ValidationError(_) => StatusCode::BAD_REQUEST,

            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            Self::NotFound(_)
            | Self::TransactionNotFound
            | Self::BudgetNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            Self::Conflict(_) | Self::EmailAlreadyExists | Self::BudgetAlreadyExists(_) => {
                StatusCode::CONFLICT
            }

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable error code
    pub code: i32,
    /// Human-readable error message
    pub msg: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.error_code(),
            msg: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::Unauthenticated => {
                Self::Unauthorized
            }
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::WeakPassword(msg) => Self::PasswordTooWeak(msg),
            other => {
                tracing::error!(error = %other, "Authentication service error");
                Self::InternalError
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => Self::NotFound(msg),
            DbError::Duplicate(msg) => Self::Conflict(msg),
            other => {
                tracing::error!(error = ?other, "Database error");
                Self::DatabaseError
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
