//! Signed, time-limited bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the subject id plus a snapshot of the
//! user's email, name and role. The snapshot is a cache for clients: the
//! request authenticator always re-reads the live user before trusting it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use meta_postgres::model::User;
use meta_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handler::{ErrorKind, Result};
use crate::{Error, TRACING_TARGET_AUTHENTICATION};

/// Signing secret used when `JWT_SECRET` is not configured.
///
/// Publicly known, so any deployment running with it accepts forged tokens.
pub const INSECURE_DEFAULT_SECRET: &str = "meta-educacao-insecure-default-secret";

/// Shortest secret accepted without a startup warning, in bytes.
const RECOMMENDED_SECRET_LENGTH: usize = 32;

/// Default token lifetime: seven days.
const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Token signing configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct TokenConfig {
    /// Secret used to sign and verify tokens.
    #[cfg_attr(any(test, feature = "config"), arg(long, env = "JWT_SECRET"))]
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Token lifetime in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "JWT_TTL_SECS", default_value_t = DEFAULT_TTL_SECS)
    )]
    #[serde(default = "TokenConfig::default_ttl_secs")]
    pub jwt_ttl_secs: u64,

    /// Value of the `iss` claim; tokens from any other issuer are rejected.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "JWT_ISSUER", default_value = "meta-educacao")
    )]
    #[serde(default = "TokenConfig::default_issuer")]
    pub jwt_issuer: String,
}

impl TokenConfig {
    fn default_ttl_secs() -> u64 {
        DEFAULT_TTL_SECS
    }

    fn default_issuer() -> String {
        "meta-educacao".to_owned()
    }

    /// Creates a configuration signing with the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Returns the token lifetime.
    #[inline]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.jwt_ttl_secs)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_ttl_secs: Self::default_ttl_secs(),
            jwt_issuer: Self::default_issuer(),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_ttl_secs", &self.jwt_ttl_secs)
            .field("jwt_issuer", &self.jwt_issuer)
            .finish()
    }
}

/// Identity claims a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.role,
        }
    }
}

/// Decoded token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject: the user id.
    #[serde(rename = "sub")]
    pub user_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: UserRole,
    /// Issued at, in unix seconds.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expires at, in unix seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
    #[serde(rename = "iss")]
    issued_by: String,
}

impl AuthClaims {
    /// Returns the identity part of the claims.
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }

    /// Returns whether the expiry has passed.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }
}

/// Issues and verifies bearer tokens with a process-wide secret.
///
/// Cheap to clone; the keys are shared behind an [`Arc`] and never change
/// after construction.
#[derive(Clone)]
pub struct TokenCodec {
    inner: Arc<TokenCodecInner>,
}

struct TokenCodecInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    issuer: String,
}

impl TokenCodec {
    /// Creates a codec from raw secret bytes.
    pub fn new(secret: &[u8], ttl: Duration, issuer: impl Into<String>) -> Result<Self, Error> {
        let ttl_secs = i64::try_from(ttl.as_secs())
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| Error::config("token lifetime must be a positive number of seconds"))?;

        let issuer = issuer.into();
        if issuer.trim().is_empty() {
            return Err(Error::config("token issuer cannot be empty"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["sub", "iat", "exp", "iss"]);

        let inner = TokenCodecInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
            issuer,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a codec from configuration.
    ///
    /// A missing or empty secret falls back to [`INSECURE_DEFAULT_SECRET`]
    /// and logs an error; a short secret logs a warning. Neither stops the
    /// server from starting.
    pub fn from_config(config: &TokenConfig) -> Result<Self, Error> {
        let secret = match config.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => {
                if secret.len() < RECOMMENDED_SECRET_LENGTH {
                    tracing::warn!(
                        target: TRACING_TARGET_AUTHENTICATION,
                        length = secret.len(),
                        recommended = RECOMMENDED_SECRET_LENGTH,
                        "JWT_SECRET is shorter than recommended"
                    );
                }
                secret
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    "JWT_SECRET is not set, signing tokens with the built-in insecure default; \
                     never run like this in production"
                );
                INSECURE_DEFAULT_SECRET
            }
        };

        Self::new(secret.as_bytes(), config.ttl(), &config.jwt_issuer)
    }

    /// Returns the configured token lifetime in seconds.
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.inner.ttl_secs
    }

    /// Issues a token for the subject, expiring one lifetime from now.
    pub fn issue(&self, subject: &TokenSubject) -> Result<String> {
        self.issue_at(subject, Timestamp::now().as_second())
    }

    /// Issues a token as if the current time were `issued_at`.
    fn issue_at(&self, subject: &TokenSubject, issued_at: i64) -> Result<String> {
        let claims = AuthClaims {
            user_id: subject.id,
            email: subject.email.clone(),
            name: subject.name.clone(),
            role: subject.role,
            issued_at,
            expires_at: issued_at.saturating_add(self.inner.ttl_secs),
            issued_by: self.inner.issuer.clone(),
        };

        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.inner.encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                user_id = %subject.id,
                "failed to encode token"
            );

            ErrorKind::InternalServerError
                .with_context("Unable to create session token")
                .with_resource("authentication")
        })
    }

    /// Verifies a token and returns its claims.
    ///
    /// Any failure (bad signature, malformed structure, foreign issuer,
    /// expiry) resolves to `ErrorKind::InvalidToken`; arbitrary input never
    /// panics.
    pub fn verify(&self, token: &str) -> Result<AuthClaims> {
        let token_data = decode::<AuthClaims>(token, &self.inner.decoding_key, &self.inner.validation)
            .inspect_err(|e| {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %e,
                    "token verification failed"
                );
            })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_secs", &self.inner.ttl_secs)
            .field("issuer", &self.inner.issuer)
            .finish_non_exhaustive()
    }
}
