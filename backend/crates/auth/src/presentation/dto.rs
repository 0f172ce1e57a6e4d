//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Success message of both login routes
pub const LOGIN_MESSAGE: &str = "user is logged in";

// ============================================================================
// Register
// ============================================================================

/// Staff register request
#[derive(Debug, Clone, Deserialize)]
pub struct StaffRegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Guest register request
#[derive(Debug, Clone, Deserialize)]
pub struct GuestRegisterRequest {
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register response (201)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub inserted_id: Uuid,
}

// ============================================================================
// Login
// ============================================================================

/// Login request (both account kinds)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// `user` is the account profile, which never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse<U> {
    pub status_code: u16,
    pub message: String,
    pub token: String,
    pub user: U,
}

// ============================================================================
// Update / Delete
// ============================================================================

/// Staff update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStaffRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// Guest update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGuestRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Staff-specific fields merged into the stored document
#[derive(Debug, Clone, Serialize)]
pub struct StaffChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

/// Guest-specific fields merged into the stored document
#[derive(Debug, Clone, Serialize)]
pub struct GuestChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Delete response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}
