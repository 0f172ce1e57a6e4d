//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod manage_accounts;
pub mod sign_in;
pub mod sign_up;
pub mod token_service;

// Re-exports
pub use config::{AuthConfig, ConfigError};
pub use manage_accounts::{ManageAccountsUseCase, UpdateAccountInput};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token_service::{Claims, Principal, SigningError, TOKEN_TTL, TokenError, TokenService};
