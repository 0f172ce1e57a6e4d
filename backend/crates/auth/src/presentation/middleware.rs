//! Auth Middleware
//!
//! Bearer-token gate for protected routes. A request either passes
//! through unchanged or is answered here with 401/403; rejected requests
//! never reach a handler or the store.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::bearer::{BearerError, extract_bearer_token};
use thiserror::Error;

use crate::application::token_service::{Principal, TokenError, TokenService};

/// Reason a request was turned away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("Missing auth token")]
    MissingToken,

    #[error("invalid jwt token: {0}")]
    InvalidToken(String),

    #[error("missing admin privileges")]
    Forbidden,
}

impl From<BearerError> for AuthRejection {
    fn from(err: BearerError) -> Self {
        AuthRejection::InvalidToken(err.to_string())
    }
}

impl From<TokenError> for AuthRejection {
    fn from(err: TokenError) -> Self {
        AuthRejection::InvalidToken(err.to_string())
    }
}

impl AuthRejection {
    fn to_app_error(&self) -> AppError {
        match self {
            AuthRejection::MissingToken | AuthRejection::InvalidToken(_) => {
                AppError::unauthorized(self.to_string())
            }
            AuthRejection::Forbidden => AppError::forbidden(self.to_string()),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match &self {
            AuthRejection::Forbidden => tracing::warn!("Non-admin token on admin route"),
            other => tracing::debug!(reason = %other, "Request rejected by auth gate"),
        }
        self.to_app_error().into_response()
    }
}

/// Middleware state: a shared handle to the token verifier
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Decide whether a request with these headers may proceed
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        require_admin: bool,
    ) -> Result<Principal, AuthRejection> {
        let token = extract_bearer_token(headers)?.ok_or(AuthRejection::MissingToken)?;
        let principal = self.tokens.verify(&token)?;

        if require_admin && !principal.is_admin {
            return Err(AuthRejection::Forbidden);
        }

        Ok(principal)
    }
}

/// Middleware that requires any valid token
pub async fn require_token(
    State(gate): State<AuthGate>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    gate.authorize(req.headers(), false)
        .map_err(IntoResponse::into_response)?;

    Ok(next.run(req).await)
}

/// Middleware that requires a valid token carrying the admin flag
pub async fn require_admin(
    State(gate): State<AuthGate>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    gate.authorize(req.headers(), true)
        .map_err(IntoResponse::into_response)?;

    Ok(next.run(req).await)
}
