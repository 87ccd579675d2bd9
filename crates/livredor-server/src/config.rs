//! Server configuration loaded from environment variables.
//!
//! All settings except the API credential have sensible defaults so the
//! server can start with zero configuration for local development.  A
//! missing credential is not fatal at startup; submissions fail with a
//! configuration error until the operator sets it.

use std::net::SocketAddr;

use livredor_shared::constants::DEFAULT_HTTP_PORT;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Bearer credential for the repository content API.
    /// Env: `GITHUB_TOKEN`
    /// Default: unset (submissions answer 500 until configured).
    pub api_token: Option<String>,

    /// Repository slug (`owner/name`) holding the note blob.
    /// Env: `GUESTBOOK_REPO`
    /// Default: `livredor/livredor.github.io`
    pub repo: String,

    /// Path of the note blob within the repository.
    /// Env: `NOTE_PATH`
    /// Default: `files/website/note.txt`
    pub note_path: String,

    /// Base URL of the content API.  Overridable so tests and self-hosted
    /// forges can point elsewhere.
    /// Env: `API_BASE`
    /// Default: `https://api.github.com`
    pub api_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            api_token: None,
            repo: "livredor/livredor.github.io".to_string(),
            note_path: "files/website/note.txt".to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(
                    value = %addr,
                    "Invalid HTTP_ADDR, using default"
                );
            }
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.api_token = Some(token);
            }
        }

        if let Ok(repo) = std::env::var("GUESTBOOK_REPO") {
            config.repo = repo;
        }

        if let Ok(path) = std::env::var("NOTE_PATH") {
            config.note_path = path;
        }

        if let Ok(base) = std::env::var("API_BASE") {
            config.api_base = base;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
