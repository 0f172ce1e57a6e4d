//! Ordering Router

use auth::{AuthGate, TokenService, require_admin, require_token};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use platform::store::{DocumentStore, PgDocumentStore};
use std::sync::Arc;

use crate::presentation::handlers::{self, OrderingAppState};

/// Create the Ordering router backed by PostgreSQL
pub fn ordering_router(store: PgDocumentStore, tokens: Arc<TokenService>) -> Router {
    ordering_router_generic(store, tokens)
}

/// Create a generic Ordering router for any document store
///
/// Reading the menu and everything on orders needs a valid token;
/// changing the menu needs an admin token.
pub fn ordering_router_generic<S>(store: S, tokens: Arc<TokenService>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    let gate = AuthGate::new(tokens);
    let state = OrderingAppState {
        store: Arc::new(store),
    };

    let authenticated = Router::new()
        .route("/api/items", get(handlers::list_items::<S>))
        .route("/api/items/{id}", get(handlers::get_item::<S>))
        .route(
            "/api/orders",
            post(handlers::create_order::<S>).get(handlers::list_orders::<S>),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::get_order::<S>)
                .put(handlers::update_order::<S>)
                .delete(handlers::delete_order::<S>),
        )
        .route_layer(middleware::from_fn_with_state(gate.clone(), require_token));

    let admin = Router::new()
        .route("/api/items", post(handlers::create_item::<S>))
        .route(
            "/api/items/{id}",
            put(handlers::update_item::<S>).delete(handlers::delete_item::<S>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_admin));

    authenticated.merge(admin).with_state(state)
}
