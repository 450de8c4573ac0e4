//! Echo Service binary
//!
//! Serves the echo router on a fixed port.

use anyhow::{Context, Result};
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

    info!("Starting Echo Service");

    let addr = SocketAddr::from(([0, 0, 0, 0], echo_service::PORT));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Echo service listening on {}", addr);

    axum::serve(listener, echo_service::router()).await?;

    Ok(())
}
