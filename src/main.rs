//! ThinkAI HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use thinkai::adapters::http::{app_router, AdvisorHandlers};
use thinkai::adapters::{InMemorySessionStore, OpenAIClient};
use thinkai::config::AppConfig;

const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config);

    if !config.ai.has_openai() {
        warn!("No OpenAI API key configured; assistance requests will fail with 'missing credential'");
    }

    let client = OpenAIClient::new(config.ai.openai_config())
        .context("Failed to build OpenAI client")?;
    let store = InMemorySessionStore::with_ttl(config.server.session_ttl());
    let _sweeper = store.spawn_sweeper(SESSION_SWEEP_PERIOD);
    let handlers = AdvisorHandlers::new(
        Arc::new(store),
        Arc::new(client),
        config.ai.dispatch_settings(),
    );
    let app = app_router(handlers, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, model = %config.ai.model, "ThinkAI listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("ThinkAI stopped");
    Ok(())
}

/// RUST_LOG wins over the configured filter. Production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
