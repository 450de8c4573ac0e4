//! Echo Service
//!
//! Stateless JSON echo endpoint. Whatever message arrives at `/echo` is sent
//! back prefixed with `Received: ` and stamped with the server time.
//!
//! Request decoding is lenient: only the first JSON value of the body is
//! read, field names match case-insensitively, the last duplicate wins and a
//! `null` message leaves it unset.

use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::fmt;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Port the echo service listens on.
pub const PORT: u16 = 8081;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EchoRequest {
    pub message: String,
}

impl EchoRequest {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, EchoError> {
        serde_json::Deserializer::from_slice(body)
            .into_iter::<EchoRequest>()
            .next()
            .ok_or(EchoError::EmptyBody)?
            .map_err(EchoError::from)
    }
}

/// Field names match under simple case folding. For `message` that is ASCII
/// case plus U+017F, which folds to `s`.
fn is_message_field(key: &str) -> bool {
    key.chars()
        .map(|c| if c == '\u{17f}' { 's' } else { c.to_ascii_lowercase() })
        .eq("message".chars())
}

struct EchoRequestVisitor;

impl<'de> Visitor<'de> for EchoRequestVisitor {
    type Value = EchoRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a `message` string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<EchoRequest, E> {
        Ok(EchoRequest::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<EchoRequest, A::Error> {
        let mut req = EchoRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if is_message_field(&key) {
                if let Some(message) = map.next_value::<Option<String>>()? {
                    req.message = message;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(req)
    }
}

impl<'de> Deserialize<'de> for EchoRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EchoRequestVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl EchoResponse {
    /// Build the reply for `req`, stamped with the current time.
    pub fn reply_to(req: &EchoRequest) -> Self {
        Self {
            message: format!("Received: {}", req.message),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EchoError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid JSON: empty body")]
    EmptyBody,
}

impl IntoResponse for EchoError {
    fn into_response(self) -> Response {
        debug!("Rejecting echo request: {}", self);
        (StatusCode::BAD_REQUEST, "Invalid JSON").into_response()
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/ping", any(ping))
        // Any method is accepted; only the body decides the outcome.
        .route("/echo", any(echo).layer(DefaultBodyLimit::disable()))
        .layer(TraceLayer::new_for_http())
}

async fn ping() -> &'static str {
    "pong from echo-service"
}

async fn echo(body: Bytes) -> Result<Json<EchoResponse>, EchoError> {
    let req = EchoRequest::from_body(&body)?;
    Ok(Json(EchoResponse::reply_to(&req)))
}
