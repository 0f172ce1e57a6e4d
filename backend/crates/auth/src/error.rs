//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::store::StoreError;
use thiserror::Error;

use crate::application::token_service::SigningError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email is already registered for this account kind
    #[error("email already used")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    /// Password could not be hashed or the stored hash is unreadable
    #[error("unable to process credentials: {0}")]
    Hashing(#[from] PasswordHashError),

    #[error("unable to create token: {0}")]
    Signing(#[from] SigningError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Validation and request errors that already carry their response
    #[error(transparent)]
    App(AppError),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::NotAcceptable,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Hashing(_) | AuthError::Signing(_) => ErrorKind::InternalServerError,
            AuthError::Store(e) => e.kind(),
            AuthError::App(e) => e.kind(),
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their detail out of the response body.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::App(e) => e,
            AuthError::Store(e) => e.into(),
            AuthError::Hashing(e) => AppError::internal("unable to process credentials").with_source(e),
            AuthError::Signing(e) => AppError::internal("unable to create token").with_source(e),
            AuthError::EmailTaken => AppError::not_acceptable(AuthError::EmailTaken.to_string()),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Credential hashing failed");
            }
            AuthError::Signing(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::App(err)
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::App(rejection.into())
    }
}
