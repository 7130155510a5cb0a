/**
 * Session Tokens
 *
 * Access tokens are HMAC-signed JWTs carrying the user id as `sub` and an
 * absolute `exp`. Nothing is persisted: a token is valid until its `exp`,
 * whatever happens to the account in between.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::shared::config::{ConfigError, Settings};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: i64,
}

/// Token verification failures
///
/// Callers map every variant to the same unauthenticated response; the
/// distinction exists for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token could not be signed: {0}")]
    Encoding(String),
}

/// Issues and verifies access tokens with a process-wide key
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec for an HMAC algorithm
    ///
    /// # Errors
    /// `InvalidValue` if `algorithm` is not HS256, HS384 or HS512
    pub fn new(secret: &str, algorithm: &str, default_ttl: Duration) -> Result<Self, ConfigError> {
        let algorithm = Algorithm::from_str(algorithm)
            .ok()
            .filter(|alg| matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "ALGORITHM",
                value: algorithm.to_string(),
                reason: "only HS256, HS384 and HS512 are supported".to_string(),
            })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            default_ttl,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(
            &settings.secret_key,
            &settings.algorithm,
            settings.access_token_ttl(),
        )
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject`
    ///
    /// # Arguments
    /// * `subject` - User ID
    /// * `ttl` - lifetime; `None` uses the configured default. Zero or
    ///   negative values produce a token that is already expired.
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = ttl.unwrap_or(self.default_ttl);

        let claims = Claims {
            sub: subject.to_string(),
            exp: now.saturating_add(ttl.num_seconds()),
            iat: now,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return its subject
    ///
    /// Expiry is checked without leeway: a token is rejected from its `exp`
    /// second onwards.
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}
