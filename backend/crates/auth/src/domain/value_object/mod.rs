//! Value Object Module

pub mod email;
pub mod subject_id;
pub mod user_password;
