//! Password Service
//!
//! Argon2id hashing with configurable cost and an optional pepper.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use zeroize::Zeroizing;

use crate::config::PasswordConfig;
use crate::error::{AuthError, AuthResult};

/// Password service for hashing and verification
#[derive(Clone)]
pub struct PasswordService {
    config: PasswordConfig,
}

impl PasswordService {
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Hash a password using Argon2id, checking its strength first
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        self.validate_password_strength(password)?;

        let peppered = self.peppered(password);
        let salt = SaltString::generate(&mut OsRng);

        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            Some(self.config.hash_length as usize),
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC hash.
    ///
    /// A wrong password is `Ok(false)`; an unparseable hash is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool> {
        let peppered = self.peppered(password);

        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Stored hash unreadable: {}", e)))?;

        // Cost parameters are read back from the hash itself
        match Argon2::default().verify_password(peppered.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Internal(e.to_string())),
        }
    }

    /// Length bounds only
    pub fn validate_password_strength(&self, password: &str) -> AuthResult<()> {
        let length = password.chars().count();
        if length < self.config.min_password_length {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.config.min_password_length
            )));
        }
        if length > self.config.max_password_length {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at most {} characters",
                self.config.max_password_length
            )));
        }
        Ok(())
    }

    fn peppered(&self, password: &str) -> Zeroizing<String> {
        match self.config.pepper {
            Some(ref pepper) => Zeroizing::new(format!("{}{}", password, pepper)),
            None => Zeroizing::new(password.to_string()),
        }
    }
}
