//! HS256 bearer tokens.
//!
//! Tokens are stateless: nothing is stored server-side and a token stays
//! valid until its `exp` passes.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, ADMIN_SUBJECT};
use crate::config::{ConfigError, SecurityConfig};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject; the only accepted value is [`ADMIN_SUBJECT`].
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

impl Claims {
    /// Claims issued now. Fails when `now + ttl` is not a representable time.
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Signing("token lifetime out of range".to_string()))?;
        Ok(Self {
            sub: subject.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// A positive token lifetime of `minutes` whose expiry is representable.
pub fn ttl_from_minutes(minutes: i64) -> Option<Duration> {
    Duration::try_minutes(minutes)
        .filter(|ttl| *ttl > Duration::zero())
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, ConfigError> {
        let secret = config.jwt_secret()?;
        let ttl = ttl_from_minutes(config.jwt_expiry_minutes).ok_or_else(|| ConfigError::Invalid {
            key: "JWT_EXPIRY_MINUTES",
            reason: format!("{} is not a usable token lifetime", config.jwt_expiry_minutes),
        })?;
        Ok(Self::new(secret, ttl))
    }

    /// Default lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        self.sign(&Claims::new(subject, ttl)?)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, then require the admin subject.
    ///
    /// Every failure collapses into [`AuthError::InvalidToken`]; the concrete
    /// reason is only logged.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AuthError::InvalidToken
            })?
            .claims;

        if claims.sub != ADMIN_SUBJECT {
            tracing::debug!(subject = %claims.sub, "Rejected bearer token for unknown subject");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
