//! Sign Up Use Case
//!
//! Creates a new staff or guest account.

use std::sync::Arc;

use platform::store::{DocumentStore, DocumentStoreExt};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::account::Account;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub inserted_id: Uuid,
}

/// Sign up use case
pub struct SignUpUseCase<S>
where
    S: DocumentStore + Sync,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignUpUseCase<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    /// Validate credentials, hash the password and store the account
    /// produced by `build`
    ///
    /// The email is checked against existing accounts of the same kind
    /// first. Two concurrent registrations of one email can both pass
    /// that check.
    pub async fn execute<A, F>(&self, input: SignUpInput, build: F) -> AuthResult<SignUpOutput>
    where
        A: Account,
        F: FnOnce(Email, UserPassword) -> A + Send,
    {
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let accounts = self.store.collection::<A>();
        if accounts.find_one_by("email", email.as_str()).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password = UserPassword::from_raw(raw_password, self.config.hasher()).await?;
        let account = build(email, password);
        let inserted_id = accounts.insert(&account).await?;

        tracing::info!(
            kind = A::KIND,
            id = %inserted_id,
            is_admin = account.is_admin(),
            "Account registered"
        );

        Ok(SignUpOutput { inserted_id })
    }
}
