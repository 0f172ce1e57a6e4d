//! Bearer Token Header Parsing
//!
//! Extracts the credential from `Authorization: Bearer <token>`.

use axum::http::{HeaderMap, header};
use thiserror::Error;

const BEARER_SCHEME: &str = "Bearer";

/// Reasons a present `Authorization` header is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header is not valid UTF-8")]
    NotUtf8,

    #[error("Authorization scheme is not Bearer")]
    WrongScheme,

    #[error("Bearer token is empty")]
    EmptyToken,
}

/// Extract the bearer token from request headers
///
/// Returns `Ok(None)` when the header is absent, so callers can tell a
/// missing credential from a malformed one. The scheme match is
/// case-insensitive; whitespace around the token is stripped.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, BearerError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| BearerError::NotUtf8)?.trim();

    let (scheme, token) = value
        .split_once(|c: char| c.is_ascii_whitespace())
        .unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::WrongScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(Some(token.to_string()))
}
