//! Greeter Service
//!
//! Serves the landing page and relays a fixed greeting through the echo
//! service. The echo service's reply is passed back to the caller untouched.

use axum::{
    extract::{Request, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeFile, trace::TraceLayer};
use tracing::debug;

pub mod config;
pub mod error;

pub use config::GreeterConfig;
pub use error::RelayError;

/// Port the greeter service listens on.
pub const PORT: u16 = 8080;

/// Payload the greeter sends to the echo service.
#[derive(Debug, Clone, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

impl Default for Greeting {
    fn default() -> Self {
        Self {
            message: "Hello from greeter-service",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<GreeterConfig>,
    http_client: Client,
}

impl AppState {
    /// The client carries no timeout and no retry policy: a hung echo
    /// service hangs the inbound request.
    pub fn new(config: GreeterConfig) -> reqwest::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            http_client: Client::builder().build()?,
        })
    }

    pub fn config(&self) -> &GreeterConfig {
        &self.config
    }
}

pub fn router(state: AppState) -> Router {
    let index = ServiceBuilder::new()
        .map_request(as_page_request)
        .service(ServeFile::new(&state.config.index_page));

    Router::new()
        .route("/ping", any(ping))
        .route("/hello", any(hello))
        .fallback_service(index)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The landing page answers every method; HEAD keeps its bodiless reply.
fn as_page_request(mut req: Request) -> Request {
    if req.method() != Method::HEAD {
        *req.method_mut() = Method::GET;
    }
    req
}

async fn ping() -> &'static str {
    "pong from greeter-service"
}

async fn hello(State(state): State<AppState>) -> Result<Response, RelayError> {
    let payload = serde_json::to_vec(&Greeting::default()).map_err(RelayError::Payload)?;

    let url = state.config.echo_url();
    debug!("Calling echo-service at {}", url);

    let resp = state
        .http_client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .map_err(RelayError::Call)?;

    // Consumes the response; the connection is released on every path.
    let body = resp.bytes().await.map_err(RelayError::Read)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
