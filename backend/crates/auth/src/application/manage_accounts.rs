//! Manage Accounts Use Case
//!
//! List, fetch, update and delete staff or guest accounts.

use std::sync::Arc;

use chrono::Utc;
use platform::store::{DocumentStore, DocumentStoreExt};
use serde::Serialize;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::account::Account;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Partial update of an account
///
/// `changes` holds the kind-specific fields (names, admin flag) and is
/// merged as-is; `None` fields inside it are left untouched.
pub struct UpdateAccountInput<C> {
    pub email: Option<String>,
    pub password: Option<String>,
    pub changes: C,
}

#[derive(Serialize)]
struct AccountPatch<C> {
    #[serde(flatten)]
    changes: C,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<UserPassword>,
    updated_at: i64,
}

pub struct ManageAccountsUseCase<S>
where
    S: DocumentStore + Sync,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> ManageAccountsUseCase<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    pub async fn list<A: Account>(&self) -> AuthResult<Vec<A::Profile>> {
        let accounts = self.store.collection::<A>().find_all().await?;
        Ok(accounts.iter().map(Account::profile).collect())
    }

    pub async fn get<A: Account>(&self, id: Uuid) -> AuthResult<A::Profile> {
        self.store
            .collection::<A>()
            .find_by_id(id)
            .await?
            .map(|account| account.profile())
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply a partial update and return the stored result
    ///
    /// A new email must not belong to another account of the same kind.
    /// A new password is hashed before it is stored.
    pub async fn update<A, C>(&self, id: Uuid, input: UpdateAccountInput<C>) -> AuthResult<A::Profile>
    where
        A: Account,
        C: Serialize + Send + Sync,
    {
        let accounts = self.store.collection::<A>();

        let email = match input.email {
            Some(raw) => {
                let email = Email::new(&raw)?;
                if let Some(owner) = accounts.find_one_by("email", email.as_str()).await? {
                    if owner.id() != id {
                        return Err(AuthError::EmailTaken);
                    }
                }
                Some(email)
            }
            None => None,
        };

        let password = match input.password {
            Some(raw) => {
                let raw = RawPassword::new(raw)?;
                Some(UserPassword::from_raw(raw, self.config.hasher()).await?)
            }
            None => None,
        };

        let patch = AccountPatch {
            changes: input.changes,
            email,
            password,
            updated_at: Utc::now().timestamp(),
        };

        let updated = accounts
            .update(id, &patch)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(kind = A::KIND, id = %id, "Account updated");

        Ok(updated.profile())
    }

    /// Returns the deleted count; an unknown id is `UserNotFound`
    pub async fn delete<A: Account>(&self, id: Uuid) -> AuthResult<u64> {
        let deleted = self.store.collection::<A>().delete(id).await?;
        if deleted == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(kind = A::KIND, id = %id, "Account deleted");

        Ok(deleted)
    }
}
