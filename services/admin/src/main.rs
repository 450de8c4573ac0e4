//! Admin Service binary

use admin_service::{AdminConfig, AppState};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Admin Service");

    let config = AdminConfig::from_env().context("Admin service needs a shared secret")?;
    if config.expected_key().is_empty() {
        warn!("API_KEY is blank; requests without X-API-KEY will be accepted");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], admin_service::PORT));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Admin service listening on {}", addr);

    axum::serve(listener, admin_service::router(AppState::new(config))).await?;

    Ok(())
}
