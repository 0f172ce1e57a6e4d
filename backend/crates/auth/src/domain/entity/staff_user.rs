//! Staff User Entity
//!
//! Restaurant staff account. Admin staff manage accounts and the menu.

use chrono::Utc;
use kernel::id::StaffUserId;
use platform::store::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::value_object::{
    email::Email, subject_id::SubjectId, user_password::UserPassword,
};

/// Stored staff user document (`staff_users`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(rename = "_id")]
    pub id: StaffUserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: UserPassword,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl StaffUser {
    pub fn new(
        first_name: String,
        last_name: String,
        email: Email,
        password: UserPassword,
        is_admin: bool,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: StaffUserId::new(),
            first_name,
            last_name,
            email,
            password,
            is_admin,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Staff user as returned to clients (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUserProfile {
    #[serde(rename = "_id")]
    pub id: StaffUserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Document for StaffUser {
    const COLLECTION: &'static str = "staff_users";

    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }
}

impl Account for StaffUser {
    type Profile = StaffUserProfile;

    const KIND: &'static str = "staff";

    fn subject(&self) -> SubjectId {
        self.id.into()
    }

    fn display_name(&self) -> &str {
        &self.first_name
    }

    fn email(&self) -> &Email {
        &self.email
    }

    fn password(&self) -> &UserPassword {
        &self.password
    }

    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn profile(&self) -> StaffUserProfile {
        StaffUserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}
