//! Admin Service
//!
//! Admin page plus an endpoint gated by a shared secret sent in `X-API-KEY`.
//!
//! `/admin/debug` discloses the configured secret. It is kept deliberately as
//! a demonstration of an information leak and must not be exposed outside a
//! test environment.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, post},
    Router,
};
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{services::ServeFile, trace::TraceLayer};
use tracing::{info, warn};

pub mod config;

pub use config::{AdminConfig, ConfigError};

/// Port the admin service listens on.
pub const PORT: u16 = 8082;

pub const API_KEY_HEADER: &str = "x-api-key";

const SECRET_MESSAGE: &str = "This is a secret message from the admin service!";

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Wrong password")]
    WrongPassword,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match self {
            AdminError::WrongPassword => StatusCode::FORBIDDEN,
            AdminError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<AdminConfig>,
}

impl AppState {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let admin_page = ServiceBuilder::new()
        .map_request(as_page_request)
        .service(ServeFile::new(&state.config.admin_page));

    Router::new()
        .route("/admin/ping", any(ping))
        .route_service("/admin", admin_page)
        .route("/admin/debug", any(debug_api_key))
        .route(
            "/admin/secret",
            post(reveal_secret).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The admin page answers every method; HEAD keeps its bodiless reply.
fn as_page_request(mut req: Request) -> Request {
    if req.method() != Method::HEAD {
        *req.method_mut() = Method::GET;
    }
    req
}

async fn ping() -> &'static str {
    "pong from admin-service"
}

async fn debug_api_key(State(state): State<AppState>) -> String {
    warn!("API_KEY disclosed through /admin/debug");
    format!("API_KEY: [{}]", state.config.api_key)
}

async fn reveal_secret(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<&'static str, AdminError> {
    // A missing header is compared as the empty string.
    let presented = headers
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if presented != state.config.expected_key().as_bytes() {
        info!("Rejected secret request with wrong API key");
        return Err(AdminError::WrongPassword);
    }

    Ok(SECRET_MESSAGE)
}

async fn method_not_allowed() -> AdminError {
    AdminError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn state_with_key(api_key: &str) -> AppState {
        AppState::new(AdminConfig {
            api_key: api_key.to_string(),
            admin_page: PathBuf::from("admin.html"),
        })
    }

    async fn call(state: AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn secret_request(method: Method, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri("/admin/secret");
        if let Some(key) = key {
            builder = builder.header("X-API-KEY", key);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = call(state_with_key("k"), get_request("/admin/ping")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "pong from admin-service");

        let post_ping = Request::builder()
            .method(Method::POST)
            .uri("/admin/ping")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(state_with_key("k"), post_ping).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "pong from admin-service");
    }

    #[tokio::test]
    async fn test_secret_with_matching_key() {
        let (status, body) = call(
            state_with_key("s3cret"),
            secret_request(Method::POST, Some("s3cret")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "This is a secret message from the admin service!");
    }

    #[tokio::test]
    async fn test_configured_key_is_trimmed() {
        let (status, _) = call(
            state_with_key("  s3cret \n"),
            secret_request(Method::POST, Some("s3cret")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_secret_with_wrong_key() {
        for key in [Some("nope"), Some("S3CRET"), Some("s3cret "), None] {
            let (status, body) =
                call(state_with_key("s3cret"), secret_request(Method::POST, key)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "key: {:?}", key);
            assert_eq!(body, "Wrong password");
        }
    }

    #[tokio::test]
    async fn test_missing_header_matches_blank_key() {
        let (status, _) = call(state_with_key("   "), secret_request(Method::POST, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_secret_rejects_other_methods() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let (status, body) = call(
                state_with_key("s3cret"),
                secret_request(method.clone(), Some("s3cret")),
            )
            .await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method: {}", method);
            assert_eq!(body, "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_debug_discloses_raw_key() {
        let (status, body) = call(state_with_key(" s3cret "), get_request("/admin/debug")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "API_KEY: [ s3cret ]");
    }

    #[tokio::test]
    async fn test_admin_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("admin.html");
        std::fs::write(&page, "<h1>admin</h1>").unwrap();

        let state = AppState::new(AdminConfig {
            api_key: "k".to_string(),
            admin_page: page,
        });

        for method in [Method::GET, Method::POST] {
            let request = Request::builder()
                .method(method.clone())
                .uri("/admin")
                .body(Body::empty())
                .unwrap();
            let response = router(state.clone()).oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "method: {}", method);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert_eq!(&body[..], b"<h1>admin</h1>");
        }
    }

    #[tokio::test]
    async fn test_unrouted_paths_are_not_found() {
        for uri in ["/", "/ping", "/admin/", "/admin/unknown"] {
            let (status, _) = call(state_with_key("k"), get_request(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "uri: {}", uri);
        }
    }
}
