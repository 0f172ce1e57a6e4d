//! Guest User Entity

use chrono::Utc;
use kernel::id::GuestUserId;
use platform::store::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::value_object::{
    email::Email, subject_id::SubjectId, user_password::UserPassword,
};

/// Stored guest user document (`guest_users`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestUser {
    #[serde(rename = "_id")]
    pub id: GuestUserId,
    pub username: String,
    pub email: Email,
    pub password: UserPassword,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl GuestUser {
    pub fn new(username: String, email: Email, password: UserPassword) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: GuestUserId::new(),
            username,
            email,
            password,
            logged_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Guest user as returned to clients (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestUserProfile {
    #[serde(rename = "_id")]
    pub id: GuestUserId,
    pub username: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Document for GuestUser {
    const COLLECTION: &'static str = "guest_users";

    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }
}

impl Account for GuestUser {
    type Profile = GuestUserProfile;

    const KIND: &'static str = "guest";

    // Guests never hold admin rights
    fn is_admin(&self) -> bool {
        false
    }

    fn subject(&self) -> SubjectId {
        self.id.into()
    }

    fn display_name(&self) -> &str {
        &self.username
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn password(&self) -> &UserPassword {
        &self.password
    }

    fn record_login(&mut self, now: i64) -> Option<serde_json::Value> {
        self.logged_at = Some(now);
        Some(serde_json::json!({ "logged_at": now }))
    }

    fn profile(&self) -> GuestUserProfile {
        GuestUserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            logged_at: self.logged_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}
