pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: SessionStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db: Arc::new(db),
            sessions: SessionStore::new(chrono::Duration::minutes(config.session_ttl_minutes)),
            config: Arc::new(config),
        }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(routes::admin::dashboard))
        .route("/admin/upload", post(routes::admin::upload))
        .route("/admin/delete/{id}", post(routes::admin::delete))
        .route("/admin/messages", get(routes::admin::messages))
        .route("/admin/messages/{id}/read", post(routes::admin::mark_read))
        .route_layer(middleware::from_fn(routes::auth::require_admin));

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(routes::home::list))
        .route(
            "/quiz/{id}/start",
            get(routes::quiz::start).post(routes::quiz::start),
        )
        .route("/quiz/{id}/question/{q}", get(routes::quiz::question))
        .route("/quiz/{id}/submit", post(routes::quiz::submit))
        .route("/quiz/{id}/complete", get(routes::quiz::complete))
        .route("/quiz/{id}/review", get(routes::quiz::review))
        .route("/support/contact", post(routes::support::contact))
        .route("/admin/login", post(routes::admin::login))
        .route("/admin/logout", post(routes::admin::logout))
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.db_max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let addr = config.bind_addr();
    let app = build_router(AppState::new(db, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
