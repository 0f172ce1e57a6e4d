//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt) with a zeroizing clear text type
//! - `Authorization: Bearer` header parsing
//! - Document store abstraction with PostgreSQL and in-memory backends

pub mod bearer;
pub mod password;
pub mod store;
