//! Ordering Backend Module
//!
//! Menu items and table orders.
//!
//! - `domain/` - Item, Order, embedded item snapshots, order pricing
//! - `application/` - CRUD use cases over the document store
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Route gating reuses `auth::AuthGate`: reading the menu and working
//! with orders needs any valid token, changing the menu needs admin.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;


pub use error::{OrderingError, OrderingResult};
pub use presentation::router::{ordering_router, ordering_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
