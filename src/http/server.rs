//! Demo HTTP server.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Wire up middleware (tracing, timeout)
//! - Build every reply through [`HttpResponse`]
//!
//! # Routes
//! - `GET /` plain greeting
//! - `GET /redirect?to=<url>&code=<code>` redirect helper
//! - `GET /status/{code}` arbitrary status, 400 on an invalid code
//! - `GET /cookies` two `Set-Cookie` lines
//! - `GET /snapshot` the persistable snapshot of a sample response

use axum::{
    extract::{Path, Query, State},
    http::Version,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, ResponseConfig};
use crate::http::response::HttpResponse;
use crate::http::version::{RequestVersion, VersionDetector};

/// Header carrying the per-response identifier.
pub const X_REQUEST_ID: &str = "X-Request-Id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub response_defaults: Arc<ResponseConfig>,
}

impl AppState {
    /// Fresh response with configured defaults and a request ID.
    fn response(&self, version: Version) -> HttpResponse {
        let mut response = HttpResponse::from_config(&self.response_defaults);
        if self.response_defaults.default_version.is_none() {
            response.set_version(RequestVersion(version).detect());
        }
        response.set_header(X_REQUEST_ID, uuid::Uuid::new_v4(), true);
        response
    }
}

/// HTTP server for the demo routes.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &AppConfig) -> Router {
        let state = AppState {
            response_defaults: Arc::new(config.response.clone()),
        };

        Router::new()
            .route("/", get(index_handler))
            .route("/redirect", get(redirect_handler))
            .route("/status/{code}", get(status_handler))
            .route("/cookies", get(cookies_handler))
            .route("/snapshot", get(snapshot_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the router, e.g. to drive it in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn index_handler(State(state): State<AppState>, version: Version) -> HttpResponse {
    let mut response = state.response(version);
    response.set_body("env-response is running\n");
    response
}

#[derive(Debug, Deserialize)]
struct RedirectParams {
    to: String,
    code: Option<String>,
}

async fn redirect_handler(
    State(state): State<AppState>,
    version: Version,
    Query(params): Query<RedirectParams>,
) -> HttpResponse {
    let mut response = state.response(version);
    let code = params.code.unwrap_or_else(|| "302".to_string());

    if let Err(e) = response.set_redirect(&params.to, code) {
        bad_request(&mut response, &e.to_string());
    }
    response
}

async fn status_handler(
    State(state): State<AppState>,
    version: Version,
    Path(code): Path<String>,
) -> HttpResponse {
    let mut response = state.response(version);
    match response.set_http_response_code(code.as_str()) {
        Ok(r) => {
            let line = r.render_status_line();
            r.set_body(line);
        }
        Err(e) => bad_request(&mut response, &e.to_string()),
    }
    response
}

async fn cookies_handler(State(state): State<AppState>, version: Version) -> HttpResponse {
    let mut response = state.response(version);
    response
        .set_header("Set-Cookie", "session=abc; Path=/; HttpOnly", false)
        .set_header("Set-Cookie", "theme=dark; Path=/", false)
        .set_body("two cookies set\n");
    response
}

async fn snapshot_handler(State(state): State<AppState>, version: Version) -> HttpResponse {
    let mut sample = state.response(version);
    sample.set_body("sample body");

    let mut response = state.response(version);
    match sample.snapshot().to_json() {
        Ok(json) => {
            response
                .set_header("Content-Type", "application/json", true)
                .set_body(json);
        }
        Err(e) => {
            tracing::error!(error = %e, "Snapshot encoding failed");
            // 500 is always in range.
            let _ = response.set_http_response_code(500);
        }
    }
    response
}

fn bad_request(response: &mut HttpResponse, message: &str) {
    tracing::warn!(error = %message, "Rejecting request");
    response.clear_header("Location");
    // 400 is always in range.
    let _ = response.set_http_response_code(400);
    response.set_body(format!("{}\n", message));
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
