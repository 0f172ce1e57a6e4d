//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::OrderingAppState;
pub use router::{ordering_router, ordering_router_generic};
