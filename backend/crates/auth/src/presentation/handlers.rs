//! HTTP Handlers
//!
//! Staff and guest routes share the generic handlers below; only
//! registration and updates have a handler per account kind.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use platform::store::DocumentStore;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::manage_accounts::{ManageAccountsUseCase, UpdateAccountInput};
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::application::token_service::TokenService;
use crate::domain::account::Account;
use crate::domain::entity::{
    guest_user::{GuestUser, GuestUserProfile},
    staff_user::{StaffUser, StaffUserProfile},
};
use crate::error::AuthResult;
use crate::presentation::dto::{
    DeleteResponse, GuestChanges, GuestRegisterRequest, LOGIN_MESSAGE, LoginRequest,
    LoginResponse, SignUpResponse, StaffChanges, StaffRegisterRequest, UpdateGuestRequest,
    UpdateStaffRequest,
};

/// Shared state for auth handlers
pub struct AuthAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<S> Clone for AuthAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

/// Parse a path id, answering 400 when it is not a UUID
fn parse_id(raw: &str) -> AuthResult<Uuid> {
    Ok(Uuid::parse_str(raw).map_err(AppError::from)?)
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/staff/register
///
/// Public registration never grants admin rights, except for the
/// configured bootstrap email.
pub async fn register_staff<S>(
    State(state): State<AuthAppState<S>>,
    payload: Result<Json<StaffRegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = SignUpUseCase::new(state.store.clone(), state.config.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
    };

    let config = state.config.clone();
    let output = use_case
        .execute(input, move |email, password| {
            let is_admin = config.is_bootstrap_admin(&email);
            StaffUser::new(req.first_name, req.last_name, email, password, is_admin)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            inserted_id: output.inserted_id,
        }),
    ))
}

/// POST /api/guests/register
pub async fn register_guest<S>(
    State(state): State<AuthAppState<S>>,
    payload: Result<Json<GuestRegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = SignUpUseCase::new(state.store.clone(), state.config.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case
        .execute(input, move |email, password| {
            GuestUser::new(req.username, email, password)
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            inserted_id: output.inserted_id,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/staff/login, POST /api/guests/login
pub async fn login<S, A>(
    State(state): State<AuthAppState<S>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse<A::Profile>>>
where
    S: DocumentStore + Send + Sync + 'static,
    A: Account,
{
    let Json(req) = payload?;
    let use_case = SignInUseCase::new(
        state.store.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute::<A>(input).await?;

    Ok(Json(LoginResponse {
        status_code: StatusCode::OK.as_u16(),
        message: LOGIN_MESSAGE.to_string(),
        token: output.token,
        user: output.user,
    }))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard
pub async fn dashboard() -> StatusCode {
    StatusCode::OK
}

// ============================================================================
// Account management
// ============================================================================

/// GET /api/staff, GET /api/guests
pub async fn list<S, A>(State(state): State<AuthAppState<S>>) -> AuthResult<Json<Vec<A::Profile>>>
where
    S: DocumentStore + Send + Sync + 'static,
    A: Account,
{
    let use_case = ManageAccountsUseCase::new(state.store.clone(), state.config.clone());
    Ok(Json(use_case.list::<A>().await?))
}

/// GET /api/staff/{id}, GET /api/guests/{id}
pub async fn get<S, A>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
) -> AuthResult<Json<A::Profile>>
where
    S: DocumentStore + Send + Sync + 'static,
    A: Account,
{
    let id = parse_id(&id)?;
    let use_case = ManageAccountsUseCase::new(state.store.clone(), state.config.clone());
    Ok(Json(use_case.get::<A>(id).await?))
}

/// DELETE /api/staff/{id}, DELETE /api/guests/{id}
pub async fn delete<S, A>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
) -> AuthResult<Json<DeleteResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
    A: Account,
{
    let id = parse_id(&id)?;
    let use_case = ManageAccountsUseCase::new(state.store.clone(), state.config.clone());
    let deleted_count = use_case.delete::<A>(id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}

/// PUT /api/staff/{id}
pub async fn update_staff<S>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStaffRequest>, JsonRejection>,
) -> AuthResult<Json<StaffUserProfile>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let use_case = ManageAccountsUseCase::new(state.store.clone(), state.config.clone());

    let input = UpdateAccountInput {
        email: req.email,
        password: req.password,
        changes: StaffChanges {
            first_name: req.first_name,
            last_name: req.last_name,
            is_admin: req.is_admin,
        },
    };

    Ok(Json(use_case.update::<StaffUser, _>(id, input).await?))
}

/// PUT /api/guests/{id}
pub async fn update_guest<S>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateGuestRequest>, JsonRejection>,
) -> AuthResult<Json<GuestUserProfile>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let use_case = ManageAccountsUseCase::new(state.store.clone(), state.config.clone());

    let input = UpdateAccountInput {
        email: req.email,
        password: req.password,
        changes: GuestChanges {
            username: req.username,
        },
    };

    Ok(Json(use_case.update::<GuestUser, _>(id, input).await?))
}
