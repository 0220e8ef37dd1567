//! Spendwise Authentication Layer
//!
//! - **Password Security**: Argon2id hashing with an optional pepper
//! - **JWT Authentication**: short-lived HS256 access tokens
//! - **Middleware**: resolves a bearer token to an [`AuthenticatedUser`]
//!
//! # Flow
//!
//! ```text
//!  Request → AuthMiddleware ──(Bearer)──► JwtService ──► AuthenticatedUser
//!                  │                                          │
//!                  └──(no header)──► handler ◄── RequireAuth ─┘
//! ```
//!
//! A request without credentials passes through untouched; handlers that
//! need a user reject it via the [`RequireAuth`] extractor. A request with a
//! bad token is rejected by the middleware itself.

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod types;

pub use config::{AuthConfig, JwtConfig, PasswordConfig};
pub use error::{AuthError, AuthResult, ErrorResponse};
pub use jwt::JwtService;
pub use middleware::{AuthLayer, AuthMiddleware, RequireAuth};
pub use password::PasswordService;
pub use types::*;

use std::sync::Arc;

/// Authentication service combining token and password handling
#[derive(Clone)]
pub struct AuthService {
    pub jwt: JwtService,
    pub password: PasswordService,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new auth service, rejecting unusable configuration
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        config.validate()?;
        Ok(Self {
            jwt: JwtService::new(config.jwt.clone()),
            password: PasswordService::new(config.password.clone()),
            config,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create an auth layer for the Axum router
    pub fn layer(&self) -> AuthLayer {
        AuthLayer::new(Arc::new(self.jwt.clone()))
    }
}
