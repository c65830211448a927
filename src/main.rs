//! env-response demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request         ┌──────────────────────────────────────────────┐
//!     ───────────────────────┼─▶ axum router ──▶ handler                    │
//!                            │                     │                        │
//!                            │                     ▼                        │
//!                            │              HttpResponse                    │
//!                            │   (status, headers multimap, body,           │
//!                            │    redirect flag, version detector)          │
//!                            │                     │                        │
//!     Client Response        │                     ▼                        │
//!     ◀──────────────────────┼── platform.rs (IntoResponse, appended hdrs)  │
//!                            └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use env_response::config::{load_config, AppConfig};
use env_response::http::HttpServer;
use env_response::observability::init_logging;

#[derive(Parser)]
#[command(name = "env-response")]
#[command(about = "Demo server answering every request through HttpResponse", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address from the configuration.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    init_logging(&config.observability);
    tracing::info!("env-response v0.1.0 starting");

    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        default_version = ?config.response.default_version,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
