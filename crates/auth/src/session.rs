//! # Session Tokens
//!
//! Signed tokens stored in the session cookie. The token's `jti` is the id of
//! the server-side session row, so revoking the row invalidates the cookie
//! even before the token expires.

use base64::prelude::*;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum decoded length of the signing secret.
pub const MIN_SECRET_BYTES: usize = 32;

/// Errors raised while configuring, issuing or validating session tokens.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session secret is not configured (set PORTFOLIO_SESSION_SECRET)")]
    MissingSecret,

    #[error("Session secret must be base64: {0}")]
    InvalidSecretEncoding(#[from] base64::DecodeError),

    #[error("Session secret must decode to at least 32 bytes, got {0}")]
    SecretTooShort(usize),

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting {
        name:  &'static str,
        value: String,
    },

    #[error("Failed to encode token: {0}")]
    Encoding(jsonwebtoken::errors::Error),

    #[error("Token validation failed: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
}

/// Session cookie and token settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base64 encoded HMAC secret.
    pub secret: String,
    /// Lifetime of a browser-session sign-in.
    pub expiration_seconds: i64,
    /// Lifetime of a "remember me" sign-in.
    pub persistent_expiration_seconds: i64,
    pub issuer: String,
    pub audience: String,
    pub cookie_name: String,
    /// Adds the `Secure` attribute to the cookie.
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub const DEFAULT_COOKIE_NAME: &'static str = "portfolio_session";

    /// Configuration with defaults for everything but the secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_seconds: 8 * 60 * 60,
            persistent_expiration_seconds: 14 * 24 * 60 * 60,
            issuer: "portfolio".to_string(),
            audience: "portfolio-web".to_string(),
            cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
            secure_cookie: true,
        }
    }

    /// Reads `PORTFOLIO_SESSION_SECRET` (required) and the optional
    /// `PORTFOLIO_SESSION_EXPIRATION`, `PORTFOLIO_SESSION_PERSISTENT_EXPIRATION`,
    /// `PORTFOLIO_SESSION_ISSUER`, `PORTFOLIO_SESSION_AUDIENCE`,
    /// `PORTFOLIO_SESSION_COOKIE` and `PORTFOLIO_SECURE_COOKIE`.
    pub fn from_env() -> Result<Self, SessionError> {
        let secret = std::env::var("PORTFOLIO_SESSION_SECRET").map_err(|_| SessionError::MissingSecret)?;
        let mut config = Self::new(secret);

        if let Some(value) = env_parsed("PORTFOLIO_SESSION_EXPIRATION")? {
            config.expiration_seconds = value;
        }
        if let Some(value) = env_parsed("PORTFOLIO_SESSION_PERSISTENT_EXPIRATION")? {
            config.persistent_expiration_seconds = value;
        }
        if let Ok(value) = std::env::var("PORTFOLIO_SESSION_ISSUER") {
            config.issuer = value;
        }
        if let Ok(value) = std::env::var("PORTFOLIO_SESSION_AUDIENCE") {
            config.audience = value;
        }
        if let Ok(value) = std::env::var("PORTFOLIO_SESSION_COOKIE") {
            config.cookie_name = value;
        }
        if let Some(value) = env_parsed("PORTFOLIO_SECURE_COOKIE")? {
            config.secure_cookie = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the secret decodes to enough key material.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        let decoded = BASE64_STANDARD.decode(&self.secret)?;
        if decoded.len() < MIN_SECRET_BYTES {
            return Err(SessionError::SecretTooShort(decoded.len()));
        }
        Ok(())
    }

    /// Lifetime for a new session.
    #[inline]
    pub fn lifetime(&self, persistent: bool) -> Duration {
        if persistent {
            Duration::seconds(self.persistent_expiration_seconds)
        }
        else {
            Duration::seconds(self.expiration_seconds)
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, SessionError> {
    match std::env::var(name) {
        Ok(value) => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| {
                    SessionError::InvalidSetting {
                        name,
                        value,
                    }
                })
        },
        Err(_) => Ok(None),
    }
}

/// Generates a random base64 secret suitable for `PORTFOLIO_SESSION_SECRET`.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 48];
    rng().fill_bytes(&mut bytes);
    BASE64_STANDARD.encode(bytes)
}

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub:   String,
    pub email: String,
    pub iss:   String,
    pub aud:   String,
    pub exp:   i64,
    pub iat:   i64,
    /// Session row id.
    pub jti:   String,
}

/// Issues a signed token for a session row and returns it with its expiry.
pub fn create_session_token(
    config: &SessionConfig,
    session_id: &str,
    user_id: &str,
    email: &str,
    persistent: bool,
) -> Result<(String, DateTime<Utc>), SessionError> {
    let issued_at = Utc::now();
    let expires_at = issued_at + config.lifetime(persistent);

    let claims = Claims {
        sub:   user_id.to_string(),
        email: email.to_string(),
        iss:   config.issuer.clone(),
        aud:   config.audience.clone(),
        exp:   expires_at.timestamp(),
        iat:   issued_at.timestamp(),
        jti:   session_id.to_string(),
    };

    let key = EncodingKey::from_base64_secret(&config.secret).map_err(SessionError::Encoding)?;
    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(SessionError::Encoding)?;

    Ok((token, expires_at))
}

/// Validates signature, issuer, audience and expiry and returns the claims.
pub fn validate_token(config: &SessionConfig, token: &str) -> Result<Claims, SessionError> {
    let key = DecodingKey::from_base64_secret(&config.secret).map_err(SessionError::InvalidToken)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);
    validation.set_audience(&[config.audience.as_str()]);
    validation.validate_exp = true;

    let data = jsonwebtoken::decode::<Claims>(token, &key, &validation).map_err(SessionError::InvalidToken)?;
    Ok(data.claims)
}
