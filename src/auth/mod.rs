//! Authentication primitives.
//!
//! - [`password`] -- bcrypt verification of the admin password.
//! - [`token`] -- signed bearer tokens for the admin identity.

pub mod password;
pub mod token;

use thiserror::Error;

use crate::config::{ConfigError, SecurityConfig};

pub use token::{Claims, TokenService};

/// Subject claim carried by every accepted token.
pub const ADMIN_SUBJECT: &str = "admin";
/// Username accepted at the token endpoint.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// An authenticated identity.
pub trait Principal: Send + Sync {
    fn subject(&self) -> &str;
}

/// The single administrator identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admin;

impl Principal for Admin {
    fn subject(&self) -> &str {
        ADMIN_SUBJECT
    }
}

impl TryFrom<Claims> for Admin {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.sub == ADMIN_SUBJECT {
            Ok(Admin)
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// Username/password check for the admin account.
pub struct AdminCredentials {
    password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials").finish_non_exhaustive()
    }
}

impl AdminCredentials {
    pub fn new(password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: password_hash.into(),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.admin_password_hash()?))
    }

    /// bcrypt is deliberately slow, so the comparison runs on the blocking pool.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, AuthError> {
        if username != ADMIN_USERNAME {
            return Err(AuthError::InvalidCredentials);
        }

        let password = password.to_owned();
        let hash = self.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                false
            });

        if verified {
            Ok(Admin)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
