pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use speller_core::SpellingService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub speller: SpellingService<Database>,
    /// Whether bulk seeding of system words is allowed
    pub admin_enabled: bool,
}

impl AppState {
    pub fn new(db: Arc<Database>, admin_enabled: bool) -> Self {
        Self {
            speller: SpellingService::new(db.clone()),
            db,
            admin_enabled,
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let admin_enabled = env_flag("ADMIN_ENABLED");
    if admin_enabled {
        tracing::warn!("Admin endpoints enabled, word seeding is open to all guardians");
    }

    let state = AppState::new(Arc::new(db), admin_enabled);
    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Guardian and learner routes
        .route("/api/guardian/status", get(routes::guardian::status))
        .route(
            "/api/learners",
            get(routes::learners::list).post(routes::learners::create),
        )
        // Study routes
        .route("/api/study/queue", get(routes::study::queue))
        .route("/api/study/check", post(routes::study::check))
        .route("/api/study/outcome", post(routes::study::outcome))
        .route("/api/study/next", get(routes::study::next))
        .route("/api/study/mastered", get(routes::study::mastered))
        // Word routes
        .route("/api/words/seed", post(routes::words::seed))
        .route(
            "/api/words/custom",
            get(routes::words::list_custom).post(routes::words::add_custom),
        )
        .route("/api/words/counts", get(routes::words::counts))
        // Settings routes
        .route("/api/settings", get(routes::settings::get))
        .route("/api/settings/voice", put(routes::settings::update_voice))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/guardian/register", post(routes::guardian::register))
        .merge(protected_routes)
        .with_state(state)
}

/// Read a boolean flag from the environment ("1", "true", "yes").
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_flag() {
        std::env::set_var("SPELLER_TEST_FLAG_ON", "True");
        std::env::set_var("SPELLER_TEST_FLAG_OFF", "0");
        assert!(env_flag("SPELLER_TEST_FLAG_ON"));
        assert!(!env_flag("SPELLER_TEST_FLAG_OFF"));
        assert!(!env_flag("SPELLER_TEST_FLAG_UNSET"));
    }
}
