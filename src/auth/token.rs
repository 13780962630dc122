use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{JwtConfig, MAX_TTL_MINUTES};
use crate::error::AppError;
use crate::models::User;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: String,
    /// The user's username.
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Issues and verifies HS256 bearer tokens with the configured secret,
/// issuer and audience.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::minutes(config.ttl_minutes.clamp(1, MAX_TTL_MINUTES)),
        }
    }

    /// Generates a token for `user`, expiring `ttl` after now.
    ///
    /// # Returns
    /// The compact JWT string, or `AppError::InternalServerError` if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature, expiry, issuer and audience, and returns the claims.
    ///
    /// Returns `AppError::Unauthorized` if any check fails.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
