//! INPACT · Algorithm Lessons Backend
//!
//! - Axum HTTP API serving lesson JSON documents from disk
//! - Every lesson passes the quality pipeline (verify → deterministic repair → re-verify)
//! - Static SPA fallback (STATIC_DIR/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 3001)
//!   LESSONS_DIR        : lesson JSON root (default "./algo")
//!   STATIC_DIR         : built frontend (default "./static")
//!   LESSON_FAST_PATH   : "current_version" (default) or "any_version"
//!   LESSON_CONFIG_PATH : path to TOML config (same keys, plus `buckets`)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod protocol;
mod quality;
mod repair;
mod routes;
mod service;
mod standards;
mod state;
mod storage;
mod telemetry;
mod verifier;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = ServerConfig::from_env();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

  // One lesson service per process, shared by all handlers.
  let state = Arc::new(AppState::new(config));
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "inpact_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "inpact_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "inpact_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
