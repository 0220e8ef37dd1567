//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spendwise_types::User;
use utoipa::ToSchema;
use validator::Validate;

// =============================================================================
// Registration
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
}

// =============================================================================
// Login
// =============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// =============================================================================
// Responses
// =============================================================================

/// Issued credential plus the user it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Access token expiry (seconds)
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}
