//! Web server for the Lumi skincare assistant.
//!
//! Wires the conversation machine to the recommendation orchestrator and
//! exposes it over HTTP.

pub mod config;
pub mod orchestrator;
pub mod replies;
pub mod routes;
pub mod sessions;

pub use config::ServerConfig;
pub use orchestrator::{Recommendation, RecommendationOrchestrator};
pub use routes::{AppState, BOT_NAME, HealthResponse, router};
pub use sessions::{SessionId, SessionStore};

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

/// Load artifacts, bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    let load_config = config.clone();
    let orchestrator =
        tokio::task::spawn_blocking(move || RecommendationOrchestrator::load(&load_config))
            .await
            .context("Artifact loading task failed")?;

    let state = AppState::new(Arc::new(orchestrator), &config)
        .context("Failed to initialize templates")?;

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("{} listening on http://{}", BOT_NAME, listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
