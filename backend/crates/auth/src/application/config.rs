//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

use platform::password::{CredentialHasher, DEFAULT_COST, MAX_COST, MIN_COST};
use thiserror::Error;

use crate::domain::value_object::email::Email;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_KEY must be set to a non-empty value")]
    MissingSecret,

    #[error("BCRYPT_COST must be an integer in 4..=31 (got {0:?})")]
    InvalidCost(String),

    #[error("BOOTSTRAP_ADMIN_EMAIL is not a valid email: {0}")]
    InvalidBootstrapEmail(String),
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Email whose public staff registration is granted admin rights
    pub bootstrap_admin_email: Option<Email>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            bcrypt_cost: DEFAULT_COST,
            bootstrap_admin_email: None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("bootstrap_admin_email", &self.bootstrap_admin_email)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (cheap hashing, throwaway secret)
    pub fn development() -> Self {
        Self {
            bcrypt_cost: MIN_COST,
            ..Self::with_random_secret()
        }
    }

    /// Load from `JWT_KEY`, `BCRYPT_COST` and `BOOTSTRAP_ADMIN_EMAIL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSecret)?
            .into_bytes();

        let bcrypt_cost = match std::env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (MIN_COST..=MAX_COST).contains(cost))
                .ok_or(ConfigError::InvalidCost(raw))?,
            Err(_) => DEFAULT_COST,
        };

        let bootstrap_admin_email = std::env::var("BOOTSTRAP_ADMIN_EMAIL")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Email::new(&raw).map_err(|_| ConfigError::InvalidBootstrapEmail(raw)))
            .transpose()?;

        Ok(Self {
            jwt_secret,
            bcrypt_cost,
            bootstrap_admin_email,
        })
    }

    pub fn hasher(&self) -> CredentialHasher {
        CredentialHasher::new(self.bcrypt_cost)
    }

    /// Whether a public staff registration for `email` becomes an admin
    pub fn is_bootstrap_admin(&self, email: &Email) -> bool {
        self.bootstrap_admin_email.as_ref() == Some(email)
    }
}
