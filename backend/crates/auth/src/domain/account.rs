//! Account Trait
//!
//! Staff and guest users share one sign-up, sign-in and management flow.
//! Everything that differs between the two kinds goes through this trait.

use platform::store::Document;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::value_object::{
    email::Email, subject_id::SubjectId, user_password::UserPassword,
};

/// A user document that can sign in
pub trait Account: Document + Clone {
    /// Client-facing view without the password hash
    type Profile: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Short label for logs ("staff", "guest")
    const KIND: &'static str;

    fn subject(&self) -> SubjectId;

    /// Name embedded in the token
    fn display_name(&self) -> &str;

    fn email(&self) -> &Email;

    fn password(&self) -> &UserPassword;

    fn is_admin(&self) -> bool;

    fn profile(&self) -> Self::Profile;

    /// Mark a successful login
    ///
    /// Returns the fields to persist, if this kind tracks logins at all.
    fn record_login(&mut self, _now: i64) -> Option<serde_json::Value> {
        None
    }
}
