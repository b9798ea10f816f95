// ABOUTME: Server bootstrap for Proposer
// ABOUTME: Initializes tracing, opens the database, builds the model client and serves the API

use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use proposer_ai::AIService;
use proposer_api::{create_router, AppState};

pub mod config;


pub use config::{Config, ConfigError};

/// Install the global tracing subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

pub fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Opening database at {}", config.database_path.display());
    let pool = proposer_storage::connect(&config.database_path)
        .await
        .context("Failed to open database")?;

    let ai = AIService::new(config.ai_config()).context("Failed to build AI client")?;
    if !ai.has_api_key() {
        warn!("ANTHROPIC_API_KEY is not set; generation and chat requests will fail");
    }
    info!("Using model {}", ai.model());

    let state = AppState::new(pool, Arc::new(ai));
    let app = create_router(state).layer(cors_layer(&config)?);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
