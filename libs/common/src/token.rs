//! Token codec for signing and verifying session tokens
//!
//! Tokens are HS256 JWTs. The claims payload is a tagged union so a user
//! token can never be decoded as an admin token (and the reverse).

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Token configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared secret used for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 1 hour)
    pub expiry: u64,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required, must not be empty)
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 3600)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        Ok(TokenConfig { secret, expiry })
    }
}

/// Claims carried by a user token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Claims carried by an admin token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub username: String,
}

/// Who a token was issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Subject {
    User(UserClaims),
    Admin(AdminClaims),
}

/// Full JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub subject: Subject,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Malformed, forged, expired or mis-shaped token.
///
/// Callers must not branch on the cause; it is only kept for logging.
#[derive(Debug, Error)]
#[error("token verification failed: {0}")]
pub struct VerificationFailure(#[from] jsonwebtoken::errors::Error);

/// Signs and verifies session tokens with a server-held secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: u64,
}

impl TokenCodec {
    /// Initialize a new codec from its configuration
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        TokenCodec {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry: config.expiry,
        }
    }

    /// Sign a token for `subject`, valid for the configured lifetime
    pub fn sign(&self, subject: Subject) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let exp = now
            .checked_add(self.expiry)
            .ok_or_else(|| anyhow::anyhow!("Token expiry of {}s is out of range", self.expiry))?;

        let claims = Claims {
            subject,
            iat: now,
            exp,
        };

        Ok(self.encode(&claims)?)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> jsonwebtoken::errors::Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
    }

    /// Verify signature and expiry and return the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, VerificationFailure> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    pub fn expiry(&self) -> u64 {
        self.expiry
    }
}
