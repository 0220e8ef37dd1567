//! Authentication error types
//!
//! Errors carry enough detail for logs; [`AuthError::client_message`] is the
//! only text that reaches a client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    // =========================================================================
    // Token Errors
    // =========================================================================
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token is invalid (malformed, wrong signature, wrong issuer...)
    #[error("Invalid token")]
    InvalidToken,

    // =========================================================================
    // Credential Errors
    // =========================================================================
    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Password hashing failed
    #[error("Password hashing failed")]
    PasswordHashingFailed,

    /// No credentials were presented
    #[error("Authentication required")]
    Unauthenticated,

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not be exposed to clients)
    #[error("Internal error")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::WeakPassword(_) => 400,

            Self::TokenExpired
            | Self::InvalidToken
            | Self::InvalidCredentials
            | Self::Unauthenticated => 401,

            Self::PasswordHashingFailed | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable numeric error code, shared with the API error space
    pub fn error_code(&self) -> i32 {
        match self {
            Self::TokenExpired | Self::InvalidToken | Self::Unauthenticated => -1010,
            Self::InvalidCredentials => -1011,
            Self::WeakPassword(_) => -1012,
            Self::PasswordHashingFailed | Self::Config(_) | Self::Internal(_) => -5000,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Get safe message for client (doesn't leak internal details)
    pub fn client_message(&self) -> String {
        match self {
            Self::Internal(_) | Self::Config(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error body returned by the auth middleware and extractors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub msg: String,
}

impl From<&AuthError> for ErrorResponse {
    fn from(error: &AuthError) -> Self {
        Self {
            code: error.error_code(),
            msg: error.client_message(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::WeakPassword("short".to_string()).status_code(), 400);
        assert_eq!(AuthError::Internal("boom".to_string()).status_code(), 500);
        assert!(AuthError::Config("x".to_string()).is_server_error());
    }

    #[test]
    fn test_client_message_hides_internal_details() {
        let err = AuthError::Internal("key material".to_string());
        assert_eq!(err.client_message(), "An internal error occurred");
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::from(&AuthError::TokenExpired);
        assert_eq!(response.code, -1010);
        assert_eq!(response.msg, "Token has expired");
    }
}
