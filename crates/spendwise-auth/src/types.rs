//! Core authentication types

use serde::{Deserialize, Serialize};
use spendwise_types::UserId;

use crate::error::{AuthError, AuthResult};

/// Caller identity resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user id in decimal
    pub sub: String,
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Not before (unix seconds)
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    /// Unique token id
    pub jti: String,
}

impl TokenClaims {
    pub fn user_id(&self) -> AuthResult<UserId> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

impl TryFrom<TokenClaims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: TokenClaims) -> AuthResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}

/// A freshly issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until expiry
    pub expires_in: i64,
    /// Expiry (unix seconds)
    pub expires_at: i64,
}

impl AccessToken {
    pub fn new(access_token: String, expires_in: i64, expires_at: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            expires_at,
        }
    }
}
