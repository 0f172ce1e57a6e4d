//! User Password Value Object
//!
//! Domain wrapper around `platform::password`.
//!
//! bcrypt is CPU-bound, so hashing and verification are moved onto the
//! blocking pool with `tokio::task::spawn_blocking`; the request task
//! only awaits the result.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, CredentialHasher, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from a request body
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("password cannot be empty")
                    .with_action("Please enter a password")
            }
            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "password must be at most {} bytes (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored bcrypt hash of a user's password
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password on the blocking pool
    pub async fn from_raw(
        raw: RawPassword,
        hasher: CredentialHasher,
    ) -> Result<Self, PasswordHashError> {
        tokio::task::spawn_blocking(move || hasher.hash(&raw.0))
            .await
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
            .map(Self)
    }

    /// Check a candidate on the blocking pool
    ///
    /// `Ok(false)` means the password does not match.
    pub async fn verify(
        &self,
        candidate: RawPassword,
        hasher: CredentialHasher,
    ) -> Result<bool, PasswordHashError> {
        let hashed = self.0.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&hashed, &candidate.0))
            .await
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
    }

    /// Spend the same bcrypt work as [`UserPassword::verify`] when there
    /// is no stored hash to check against
    ///
    /// Always `Ok(false)`, so an unknown account answers no faster than a
    /// wrong password.
    pub async fn verify_missing(
        candidate: RawPassword,
        hasher: CredentialHasher,
    ) -> Result<bool, PasswordHashError> {
        Self::from_raw(candidate, hasher).await.map(|_| false)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
