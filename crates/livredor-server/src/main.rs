//! # livredor-server
//!
//! Submission endpoint for the Livredor guestbook.
//!
//! This binary provides:
//! - **REST API** (axum) with a `/submit` endpoint that appends a note to
//!   the remote blob and a `/health` check
//! - **Blob store client** that round-trips the note file through the
//!   repository content API with an optimistic token
//! - **Permissive CORS** so the statically hosted page can call the API
//!   from another origin

mod api;
mod blob_store;
mod config;
mod error;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::blob_store::RepoBlobStore;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,livredor_server=debug")),
        )
        .init();

    info!("Starting Livredor guestbook server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(
        repo = %config.repo,
        note_path = %config.note_path,
        credential_set = config.api_token.is_some(),
        "Loaded configuration"
    );

    let http_addr = config.http_addr;

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------
    let blob_store = Arc::new(RepoBlobStore::new(&config)?);

    let app_state = AppState { blob_store };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
