//! Token Service
//!
//! Issues and verifies HS256 JWTs carrying the account's identity and
//! admin flag. Tokens are stateless: nothing is stored server side and
//! a token stays valid until its `exp`, even if the account changes.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::subject_id::SubjectId;

/// Token validity window
pub const TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

// ============================================================================
// Claims / Principal
// ============================================================================

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: SubjectId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims valid for [`TOKEN_TTL`] from `issued_at` (Unix seconds)
    pub fn new(
        sub: SubjectId,
        name: impl Into<String>,
        email: impl Into<String>,
        is_admin: bool,
        issued_at: i64,
    ) -> Self {
        Self {
            sub,
            name: name.into(),
            email: email.into(),
            is_admin,
            iat: issued_at,
            exp: issued_at + TOKEN_TTL.as_secs() as i64,
        }
    }
}

/// Identity derived from a verified token, scoped to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: SubjectId,
    pub display_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            display_name: claims.name,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Token could not be produced
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("unable to sign the token: {0}")]
    Signer(#[source] jsonwebtoken::errors::Error),
}

/// Token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token signature does not match")]
    SignatureMismatch,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            JwtErrorKind::InvalidSignature => TokenError::SignatureMismatch,
            _ => TokenError::Malformed,
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Stateless issuer/verifier over one immutable secret
///
/// Shared as `Arc<TokenService>`; no locks are needed.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    has_secret: bool,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            has_secret: !secret.is_empty(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret)
    }

    /// Issue a token that expires [`TOKEN_TTL`] from now
    pub fn issue(
        &self,
        subject: SubjectId,
        display_name: &str,
        email: &str,
        is_admin: bool,
    ) -> Result<String, SigningError> {
        let claims = Claims::new(
            subject,
            display_name,
            email,
            is_admin,
            Utc::now().timestamp(),
        );
        self.sign(&claims)
    }

    /// Sign arbitrary claims
    pub fn sign(&self, claims: &Claims) -> Result<String, SigningError> {
        if !self.has_secret {
            return Err(SigningError::MissingSecret);
        }

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(SigningError::Signer)
    }

    /// Check signature and expiry, returning the embedded identity
    ///
    /// The admin flag is returned as it was at issuance; storage is not
    /// consulted.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        if !self.has_secret {
            return Err(TokenError::SignatureMismatch);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims.into())
    }

    /// `(is_valid, is_admin)` shorthand for callers that only gate
    pub fn status(&self, token: &str) -> (bool, bool) {
        match self.verify(token) {
            Ok(principal) => (true, principal.is_admin),
            Err(_) => (false, false),
        }
    }
}
