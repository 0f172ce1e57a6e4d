//! Ordering Error Types
//!
//! This module provides menu/order error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::store::StoreError;
use thiserror::Error;

/// Ordering-specific result type alias
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Ordering-specific error variants
#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("item not found")]
    ItemNotFound,

    #[error("order not found")]
    OrderNotFound,

    /// A price, or an order total, that JSON cannot carry (`inf`, `NaN`)
    #[error("item prices must add up to a finite number")]
    InvalidPrice,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Request errors that already carry their response
    #[error(transparent)]
    App(AppError),
}

impl OrderingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderingError::ItemNotFound | OrderingError::OrderNotFound => ErrorKind::NotFound,
            OrderingError::InvalidPrice => ErrorKind::BadRequest,
            OrderingError::Store(e) => e.kind(),
            OrderingError::App(e) => e.kind(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            OrderingError::Store(e) => {
                tracing::error!(error = %e, "Ordering store error");
            }
            OrderingError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Ordering internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Ordering error");
            }
        }
    }
}

impl From<OrderingError> for AppError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::App(e) => e,
            OrderingError::Store(e) => e.into(),
            OrderingError::InvalidPrice => AppError::bad_request(OrderingError::InvalidPrice.to_string()),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for OrderingError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AppError> for OrderingError {
    fn from(err: AppError) -> Self {
        OrderingError::App(err)
    }
}

impl From<JsonRejection> for OrderingError {
    fn from(rejection: JsonRejection) -> Self {
        OrderingError::App(rejection.into())
    }
}
