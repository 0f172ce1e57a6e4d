//! Sign In Use Case
//!
//! Authenticates an account by email and password and issues a token.

use std::sync::Arc;

use chrono::Utc;
use platform::store::{DocumentStore, DocumentStoreExt};

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::account::Account;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput<P> {
    /// Signed bearer token
    pub token: String,
    /// Account without its password
    pub user: P,
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: DocumentStore + Sync,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<S> SignInUseCase<S>
where
    S: DocumentStore + Sync,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            config,
            tokens,
        }
    }

    pub async fn execute<A: Account>(
        &self,
        input: SignInInput,
    ) -> AuthResult<SignInOutput<A::Profile>> {
        // Any malformed input is reported like a wrong password
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let candidate =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let accounts = self.store.collection::<A>();
        let Some(mut account) = accounts.find_one_by("email", email.as_str()).await? else {
            // Same bcrypt cost as a real check, so response time does not
            // reveal which emails are registered
            UserPassword::verify_missing(candidate, self.config.hasher()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let matches = account
            .password()
            .verify(candidate, self.config.hasher())
            .await?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(
            account.subject(),
            account.display_name(),
            account.email().as_str(),
            account.is_admin(),
        )?;

        if let Some(patch) = account.record_login(Utc::now().timestamp()) {
            // The token is already issued; a failed bookkeeping write does
            // not fail the login.
            if let Err(e) = accounts.update(account.id(), &patch).await {
                tracing::warn!(kind = A::KIND, id = %account.id(), error = %e, "Failed to record login");
            }
        }

        tracing::info!(kind = A::KIND, id = %account.id(), "Account signed in");

        Ok(SignInOutput {
            token,
            user: account.profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::domain::entity::guest_user::GuestUser;
    use crate::domain::entity::staff_user::StaffUser;
    use platform::store::MemoryDocumentStore;

    struct Fixture {
        store: Arc<MemoryDocumentStore>,
        tokens: Arc<TokenService>,
        sign_in: SignInUseCase<MemoryDocumentStore>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryDocumentStore::new());
        let config = Arc::new(AuthConfig::development());
        let tokens = Arc::new(TokenService::new(b"sign-in-fixture"));

        let sign_up = SignUpUseCase::new(Arc::clone(&store), Arc::clone(&config));
        sign_up
            .execute(
                SignUpInput {
                    email: "chef@bistro.com".into(),
                    password: "bouillabaisse".into(),
                },
                |email, password| StaffUser::new("Chef".into(), "Remy".into(), email, password, true),
            )
            .await
            .unwrap();
        sign_up
            .execute(
                SignUpInput {
                    email: "guest@bistro.com".into(),
                    password: "tarte-tatin".into(),
                },
                |email, password| GuestUser::new("hungry".into(), email, password),
            )
            .await
            .unwrap();

        Fixture {
            sign_in: SignInUseCase::new(Arc::clone(&store), config, Arc::clone(&tokens)),
            store,
            tokens,
        }
    }

    fn input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_staff_sign_in_issues_admin_token() {
        let f = fixture().await;
        let output = f
            .sign_in
            .execute::<StaffUser>(input("chef@bistro.com", "bouillabaisse"))
            .await
            .unwrap();

        let principal = f.tokens.verify(&output.token).unwrap();
        assert!(principal.is_admin);
        assert_eq!(principal.display_name, "Chef");
        assert_eq!(principal.subject.as_uuid(), Some(&output.user.id.into_uuid()));
    }

    #[tokio::test]
    async fn test_guest_sign_in_records_login() {
        let f = fixture().await;
        let output = f
            .sign_in
            .execute::<GuestUser>(input("guest@bistro.com", "tarte-tatin"))
            .await
            .unwrap();

        assert!(output.user.logged_at.is_some());
        assert!(!f.tokens.verify(&output.token).unwrap().is_admin);

        let stored = f
            .store
            .collection::<GuestUser>()
            .find_by_id(output.user.id.into_uuid())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.logged_at, output.user.logged_at);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let f = fixture().await;
        let err = f
            .sign_in
            .execute::<StaffUser>(input("chef@bistro.com", "ratatouille"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_kind() {
        let f = fixture().await;
        let err = f
            .sign_in
            .execute::<StaffUser>(input("nobody@bistro.com", "bouillabaisse"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        // Guests cannot sign in through the staff flow
        let err = f
            .sign_in
            .execute::<StaffUser>(input("guest@bistro.com", "tarte-tatin"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_still_pays_for_bcrypt() {
        let store = Arc::new(MemoryDocumentStore::new());
        // bcrypt refuses this cost; only a path that actually hashes notices
        let config = Arc::new(AuthConfig {
            bcrypt_cost: 3,
            ..AuthConfig::development()
        });
        let tokens = Arc::new(TokenService::new(b"sign-in-fixture"));
        let sign_in = SignInUseCase::new(store, config, tokens);

        let err = sign_in
            .execute::<StaffUser>(input("nobody@bistro.com", "bouillabaisse"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Hashing(_)));
    }
}
