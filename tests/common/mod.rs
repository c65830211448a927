//! Shared utilities for integration testing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use env_response::config::AppConfig;
use env_response::http::{FixedVersion, HttpResponse};

/// A response with a fixed HTTP/1.1 status line.
#[allow(dead_code)]
pub fn response() -> HttpResponse {
    HttpResponse::with_detector(Arc::new(FixedVersion::new("1.1")))
}

/// Configuration for driving the server in-process.
#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.response.server_header = Some("env-response-test".into());
    config
}

/// A bodiless GET request for `uri`.
#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Collect a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
