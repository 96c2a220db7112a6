//! JWT token utilities for authentication.
//!
//! Provides token creation and validation for the bearer-token flow. Tokens
//! are stateless: a token is good exactly as long as its signature verifies
//! and its `exp` lies in the future.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// JWT claims issued at login.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username of the authenticated user. Optional on decode so that a
    /// token without a subject is rejected by the caller rather than by serde.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issued at timestamp
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.is_empty())
    }
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_lifetime: Duration,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(config.jwt_algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtUtils {
            header: Header::new(config.jwt_algorithm),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_lifetime: Duration::minutes(config.access_token_expire_minutes),
        }
    }

    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }

    /// Generate a token for `username`, valid for `lifetime` or the default.
    pub fn generate_token(
        &self,
        username: &str,
        lifetime: Option<Duration>,
    ) -> ServiceResult<String> {
        self.generate_token_at(username, Utc::now(), lifetime)
    }

    /// Same as [`generate_token`](Self::generate_token) with an explicit clock.
    pub fn generate_token_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
        lifetime: Option<Duration>,
    ) -> ServiceResult<String> {
        let exp = now + lifetime.unwrap_or(self.default_lifetime);

        let claims = Claims {
            sub: Some(username.to_string()),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token.
    ///
    /// Every failure collapses into `InvalidToken`; the reason is only logged.
    /// `exp` must lie strictly in the future.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e.kind());
                ServiceError::InvalidToken
            })?;

        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Token validation failed: expired at {}", claims.exp);
            return Err(ServiceError::InvalidToken);
        }

        Ok(claims)
    }
}
