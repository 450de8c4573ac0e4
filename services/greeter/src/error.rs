//! Relay errors
//!
//! Each stage of the call to the echo service fails with its own message so
//! operators can tell them apart. All of them answer 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to create payload for echo-service")]
    Payload(#[source] serde_json::Error),

    #[error("Failed to call echo-service")]
    Call(#[source] reqwest::Error),

    #[error("Failed to read response from echo-service")]
    Read(#[source] reqwest::Error),
}

impl RelayError {
    fn stage(&self) -> &'static str {
        match self {
            RelayError::Payload(_) => "payload",
            RelayError::Call(_) => "call",
            RelayError::Read(_) => "read",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!(
            stage = self.stage(),
            source = ?std::error::Error::source(&self),
            "{}",
            self
        );
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
