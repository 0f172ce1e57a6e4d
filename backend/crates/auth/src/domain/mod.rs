//! Domain Layer
//!
//! Contains entities, value objects, and the account abstraction.

pub mod account;
pub mod entity;
pub mod value_object;

// Re-exports
pub use account::Account;
pub use entity::{
    guest_user::{GuestUser, GuestUserProfile},
    staff_user::{StaffUser, StaffUserProfile},
};
