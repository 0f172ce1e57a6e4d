//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthConfig, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use ordering::ordering_router;
use platform::store::{PgDocumentStore, StoreConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:12345";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,ordering=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration is checked before touching the database
    let auth_config = AuthConfig::from_env()?;
    let store_config = StoreConfig::from_env();

    // Database connection
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let store = PgDocumentStore::new(pool, &store_config);
    let tokens = Arc::new(TokenService::from_config(&auth_config));

    tracing::info!(
        bcrypt_cost = auth_config.bcrypt_cost,
        store_timeout_secs = store_config.timeout.as_secs(),
        bootstrap_admin = auth_config.bootstrap_admin_email.is_some(),
        "Configuration loaded"
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let allow_origin = if frontend_origins.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let allowed_origins: Vec<http::HeaderValue> = frontend_origins
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        AllowOrigin::list(allowed_origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(auth_router(store.clone(), auth_config, tokens.clone()))
        .merge(ordering_router(store, tokens))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind_addr.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
