//! Greeter Service binary
//!
//! Resolves the echo service from the environment once at startup, then
//! serves the greeter router on a fixed port.

use anyhow::{Context, Result};
use greeter_service::{AppState, GreeterConfig};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Greeter Service");

    let state = AppState::new(GreeterConfig::from_env()).context("Failed to build HTTP client")?;
    info!("Echo service resolved to {}", state.config().echo_url());

    let addr = SocketAddr::from(([0, 0, 0, 0], greeter_service::PORT));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Greeter service listening on {}", addr);

    axum::serve(listener, greeter_service::router(state)).await?;

    Ok(())
}
