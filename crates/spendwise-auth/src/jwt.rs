//! JWT Token Service
//!
//! HS256 access tokens. Validation checks signature, expiry, not-before,
//! issuer and audience.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use spendwise_types::UserId;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AuthError, AuthResult};
use crate::types::{AccessToken, TokenClaims};

/// JWT service for token management
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access token for a user
    pub fn issue_access_token(&self, user_id: UserId, email: &str) -> AuthResult<AccessToken> {
        let lifetime = Duration::from_std(self.config.access_token_lifetime)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let now = Utc::now();
        let exp = now + lifetime;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = self.encode(&claims)?;
        Ok(AccessToken::new(token, lifetime.num_seconds(), claims.exp))
    }

    /// Validate an access token and return claims
    pub fn validate_access_token(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    fn encode(&self, claims: &TokenClaims) -> AuthResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode access token: {}", e)))
    }
}
