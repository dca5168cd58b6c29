mod analyzer;
mod applications;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod pagination;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analyzer::HttpAnalyzer;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::screening::ContainmentMatcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentSift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the resume analyzer client
    let analyzer = Arc::new(HttpAnalyzer::new(config.ai_service_url.clone()));
    info!("Resume analyzer client initialized ({})", config.ai_service_url);

    // Skill matching strategy: substring containment, the platform default
    let skill_matcher = Arc::new(ContainmentMatcher);

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        analyzer,
        skill_matcher,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
