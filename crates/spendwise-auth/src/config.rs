//! Authentication configuration
//!
//! Durations are written in humantime form (`"15m"`, `"24h"`) in config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Shortest accepted HS256 secret, in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Main authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Password hashing configuration
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Cheap, deterministic settings for tests
    pub fn for_testing() -> Self {
        Self {
            jwt: JwtConfig {
                secret: "spendwise-test-secret-at-least-32-bytes!".to_string(),
                ..Default::default()
            },
            password: PasswordConfig {
                memory_cost: 1024,
                time_cost: 1,
                ..Default::default()
            },
        }
    }

    pub fn validate(&self) -> AuthResult<()> {
        if self.jwt.secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Config(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }
        if self.password.min_password_length > self.password.max_password_length {
            return Err(AuthError::Config(
                "password.min_password_length exceeds max_password_length".to_string(),
            ));
        }
        Ok(())
    }
}

/// JWT token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret key for signing tokens (at least 256 bits)
    pub secret: String,
    /// Access token lifetime
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,
    /// Token issuer claim
    pub issuer: String,
    /// Token audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set in production
            access_token_lifetime: Duration::from_secs(24 * 60 * 60),
            issuer: "spendwise".to_string(),
            audience: "spendwise-api".to_string(),
        }
    }
}

/// Password hashing configuration (Argon2id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB (OWASP recommends 19456 KiB minimum)
    pub memory_cost: u32,
    /// Time cost (iterations)
    pub time_cost: u32,
    /// Parallelism factor
    pub parallelism: u32,
    /// Output hash length in bytes
    pub hash_length: u32,
    /// Pepper (additional secret, optional)
    pub pepper: Option<String>,
    pub min_password_length: usize,
    /// Upper bound keeps hashing cost bounded
    pub max_password_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
            pepper: None,
            min_password_length: 8,
            max_password_length: 128,
        }
    }
}
