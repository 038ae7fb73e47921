// JWT token service for authentication
// Decision: Use HS256 algorithm for simplicity (symmetric key)
// Decision: Expiry is checked against an explicit clock so verify_at can be tested

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::config::JwtConfig;

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Why a token was rejected
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// JWT service for token generation and validation
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

    /// Generate an access token for a user, valid from now
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.generate_access_token_at(user_id, Utc::now())
    }

    /// Generate an access token as if issued at `issued_at`
    pub fn generate_access_token_at(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String> {
        let lifetime = Duration::from_std(self.config.token_lifetime)
            .context("Token lifetime out of range")?;
        let exp = issued_at
            .checked_add_signed(lifetime)
            .context("Token expiry out of range")?;

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to encode access token")
    }

    /// Validate and decode an access token against the wall clock
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        self.validate_access_token_at(token, Utc::now())
    }

    /// Validate and decode an access token as of `now`
    pub fn validate_access_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessTokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    pub fn token_lifetime_secs(&self) -> i64 {
        i64::try_from(self.config.token_lifetime.as_secs()).unwrap_or(i64::MAX)
    }
}
