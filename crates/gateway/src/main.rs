//! `openrouter-gateway` — binary entry point.
//!
//! Startup sequence:
//! 1. Merge `.env` into the environment, then load and validate [`Config`].
//! 2. Initialise the tracing subscriber (JSON logs, optional OTLP export).
//! 3. Build shared state: upstream client and token verifier.
//! 4. Build the Axum router and serve until a shutdown signal.

mod auth;
mod config;
mod server;
mod telemetry;
mod upstream;

use anyhow::Result;
use tracing::{info, warn};

use config::{Config, ConfigError};
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    load_dotenv();
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; report once on stderr and bail.
            eprintln!("{}", startup_error(&e));
            std::process::exit(1);
        }
    };

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        upstream = %cfg.upstream_base_url,
        asset_dir = %cfg.asset_dir,
        "openrouter-gateway starting"
    );
    if cfg.frame_ancestors.trim() == "*" {
        warn!("FRAME_ANCESTORS is '*': the dashboard may be embedded by any site");
    }

    // -----------------------------------------------------------------------
    // 3. Shared state
    // -----------------------------------------------------------------------
    let state = AppState::from_config(&cfg)?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        dashboard = %format!("http://localhost:{}/?token=TOKEN", cfg.port),
        "listening"
    );

    let result = server::serve(listener, router).await;
    telemetry::shutdown_telemetry();
    result
}

/// Merge a `.env` file from the working directory, if there is one.
///
/// Variables already set in the environment are left untouched.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => eprintln!("WARN: failed to load .env: {e}"),
    }
}

/// Line printed to stderr when configuration is rejected at startup.
fn startup_error(e: &ConfigError) -> String {
    format!("ERROR: {e}")
}
