//! Password Hashing and Verification
//!
//! bcrypt-based credential handling with:
//! - Salted, adaptive hashing with a configurable cost factor
//! - Zeroization of clear text on drop
//! - Redacted `Debug` output so a password never reaches a log line
//!
//! bcrypt only reads the first 72 bytes of its input. Longer passwords are
//! rejected by [`ClearTextPassword::new`] instead of being silently truncated.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// bcrypt input limit in bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Default work factor (2^12 rounds)
pub const DEFAULT_COST: u32 = 12;

/// Lowest cost bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Length of a modular crypt bcrypt string (`$2b$12$` + 53 chars)
const BCRYPT_HASH_LEN: usize = 60;

const BCRYPT_PREFIXES: &[&str] = &["$2a$", "$2b$", "$2x$", "$2y$"];

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password exceeds the bcrypt input limit
    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed (e.g. cost out of range)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a bcrypt string
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

impl From<bcrypt::BcryptError> for PasswordHashError {
    fn from(err: bcrypt::BcryptError) -> Self {
        match err {
            bcrypt::BcryptError::InvalidHash(_)
            | bcrypt::BcryptError::InvalidPrefix(_)
            | bcrypt::BcryptError::InvalidBase64(_) => PasswordHashError::InvalidHashFormat,
            other => PasswordHashError::HashingFailed(other.to_string()),
        }
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` or `Serialize`
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
/// assert_eq!(format!("{:?}", password), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Unicode is normalized using NFKC before validation, so the same
    /// password typed on different keyboards hashes identically.
    pub fn new(mut raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let actual = normalized.len();
        if actual > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual,
            });
        }

        Ok(Self(normalized))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format (`$2b$<cost>$<salt><digest>`)
///
/// Serializes as a bare string so it can sit in a stored document.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored string, checking only its outer structure
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        if hash.len() != BCRYPT_HASH_LEN || !BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
            return Err(PasswordHashError::InvalidHashFormat);
        }

        Ok(Self { hash })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Cost factor embedded in the hash
    pub fn cost(&self) -> Option<u32> {
        self.hash.get(4..6)?.parse().ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Credential Hasher
// ============================================================================

/// bcrypt hasher with a fixed work factor
///
/// Stateless apart from the cost, so one instance is shared by every
/// account flow. Calls are CPU-bound; async callers should run them on
/// `tokio::task::spawn_blocking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialHasher {
    cost: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl CredentialHasher {
    /// The cost is checked by bcrypt on every `hash` call, so an
    /// out-of-range value surfaces as [`PasswordHashError::HashingFailed`].
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        if !(MIN_COST..=MAX_COST).contains(&self.cost) {
            return Err(PasswordHashError::HashingFailed(format!(
                "cost {} outside {}..={}",
                self.cost, MIN_COST, MAX_COST
            )));
        }

        let hash = bcrypt::hash(password.as_bytes(), self.cost)?;
        Ok(HashedPassword { hash })
    }

    /// Check a candidate against a stored hash
    ///
    /// A mismatch is `Ok(false)`. Only a structurally broken hash is an error.
    pub fn verify(
        &self,
        hashed: &HashedPassword,
        candidate: &ClearTextPassword,
    ) -> Result<bool, PasswordHashError> {
        Ok(bcrypt::verify(candidate.as_bytes(), hashed.as_str())?)
    }
}

// ============================================================================
// Tests
// ============================================================================
