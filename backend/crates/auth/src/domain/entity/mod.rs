//! Entity Module

pub mod guest_user;
pub mod staff_user;
