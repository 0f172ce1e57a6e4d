//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Accounts, entities, value objects
//! - `application/` - Use cases and the token service
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate
//!
//! Persistence goes through `platform::store`; this crate has no tables
//! of its own.
//!
//! ## Features
//! - Staff and guest registration/login with email + password
//! - Stateless HS256 bearer tokens (30 minute TTL)
//! - Token-gated and admin-gated route layers, reusable by other crates
//!
//! ## Security Model
//! - Passwords hashed with bcrypt on the blocking pool
//! - The admin flag is read from the token and trusted until expiry
//! - Public staff registration never grants admin, except for the
//!   configured bootstrap email

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token_service::{Principal, TokenService};
pub use domain::value_object::subject_id::SubjectId;
pub use error::{AuthError, AuthResult};
pub use presentation::middleware::{AuthGate, require_admin, require_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
