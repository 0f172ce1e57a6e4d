//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::store::{DocumentStore, PgDocumentStore};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::entity::{guest_user::GuestUser, staff_user::StaffUser};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, require_admin, require_token};

/// Create the Auth router backed by PostgreSQL
pub fn auth_router(
    store: PgDocumentStore,
    config: AuthConfig,
    tokens: Arc<TokenService>,
) -> Router {
    auth_router_generic(store, config, tokens)
}

/// Create a generic Auth router for any document store
///
/// Register and login are public. Guest routes and the dashboard need a
/// valid token; staff management needs an admin token.
pub fn auth_router_generic<S>(store: S, config: AuthConfig, tokens: Arc<TokenService>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    let gate = AuthGate::new(tokens.clone());
    let state = AuthAppState {
        store: Arc::new(store),
        config: Arc::new(config),
        tokens,
    };

    let public = Router::new()
        .route("/api/staff/register", post(handlers::register_staff::<S>))
        .route("/api/staff/login", post(handlers::login::<S, StaffUser>))
        .route("/api/guests/register", post(handlers::register_guest::<S>))
        .route("/api/guests/login", post(handlers::login::<S, GuestUser>));

    let authenticated = Router::new()
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/guests", get(handlers::list::<S, GuestUser>))
        .route(
            "/api/guests/{id}",
            get(handlers::get::<S, GuestUser>)
                .put(handlers::update_guest::<S>)
                .delete(handlers::delete::<S, GuestUser>),
        )
        .route_layer(middleware::from_fn_with_state(gate.clone(), require_token));

    let admin = Router::new()
        .route("/api/staff", get(handlers::list::<S, StaffUser>))
        .route(
            "/api/staff/{id}",
            get(handlers::get::<S, StaffUser>)
                .put(handlers::update_staff::<S>)
                .delete(handlers::delete::<S, StaffUser>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_admin));

    public.merge(authenticated).merge(admin).with_state(state)
}
