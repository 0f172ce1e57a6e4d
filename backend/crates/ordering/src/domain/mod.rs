//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Item, Order, ItemSnapshot)
//! - Domain services (order pricing)

pub mod entities;
pub mod services;

pub use entities::{Item, ItemSnapshot, Order};
