// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use unfurl_server::handlers;
use unfurl_server::oembed::{
    fetch,
    relay::{PassthroughRelay, WellKnownFavicon},
    PreviewExtractor,
};
use unfurl_server::state::AppState;

/// Short fetch timeout so timeout-path tests finish quickly.
pub const TEST_FETCH_TIMEOUT: Duration = Duration::from_secs(1);

pub const TEST_USER_AGENT: &str = "Mozilla/5.0 (compatible; UnfurlBot-test/1.0)";

/// Engine wired with a passthrough relay and the default favicon resolver.
pub fn test_extractor() -> PreviewExtractor {
    PreviewExtractor::new(
        fetch::build_client(TEST_USER_AGENT, TEST_FETCH_TIMEOUT),
        Arc::new(PassthroughRelay),
        Arc::new(WellKnownFavicon),
    )
}

/// Build the full application router wired to a test extractor.
pub fn create_test_app() -> Router {
    let state = AppState {
        extractor: test_extractor(),
    };
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/oembed", get(handlers::preview::get_preview))
        .with_state(state)
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
