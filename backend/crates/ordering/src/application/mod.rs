//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and the document store.

pub mod manage_items;
pub mod manage_orders;

pub use manage_items::{ItemChanges, ItemsUseCase, NewItem};
pub use manage_orders::{NewOrder, OrderChanges, OrdersUseCase};
