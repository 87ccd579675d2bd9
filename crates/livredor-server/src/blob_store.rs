//! Client for the repository content API that stores the note blob.
//!
//! The API is used as an opaque key-value store: `read` fetches the blob
//! text together with an optimistic token (the content SHA), `write` puts
//! the full new text back with that token.  A stale token makes the API
//! reject the write; this client surfaces the conflict and never retries
//! or re-merges.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::ServerConfig;

/// JSON `Accept` header the content API expects.
const API_ACCEPT: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("livredor-server/", env!("CARGO_PKG_VERSION"));

/// Errors produced by the blob store client.
#[derive(Debug, Error)]
pub enum RepoStoreError {
    /// No API credential configured.  Checked before any request is sent.
    #[error("API credential is not configured")]
    MissingCredential,

    /// Transport-level failure (connect, TLS, body read).
    #[error("Content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status other than a conflict.
    #[error("Content API error: {status} - {body}")]
    Upstream { status: StatusCode, body: String },

    /// The blob changed between read and write (stale optimistic token).
    #[error("Write conflict, blob changed since read: {body}")]
    Conflict { body: String },

    /// The blob payload could not be decoded into UTF-8 text.
    #[error("Invalid blob payload: {0}")]
    Decode(String),
}

/// Current blob text plus the optimistic token required to overwrite it.
#[derive(Debug, Clone)]
pub struct RemoteBlob {
    pub content: String,
    pub token: String,
}

#[derive(Deserialize)]
struct ContentsResponse {
    /// Base64-encoded file body; the API wraps it in newlines.
    content: Option<String>,
    sha: String,
}

#[derive(Serialize)]
struct UpdatePayload<'a> {
    message: &'a str,
    content: String,
    /// Omitted entirely when creating the blob for the first time.
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct RepoBlobStore {
    http: reqwest::Client,
    api_base: String,
    repo: String,
    path: String,
    token: Option<String>,
}

impl RepoBlobStore {
    pub fn new(config: &ServerConfig) -> Result<Self, RepoStoreError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo: config.repo.clone(),
            path: config.note_path.clone(),
            token: config.api_token.clone(),
        })
    }

    /// Fetch the current blob.  `Ok(None)` means the blob does not exist
    /// yet and the next write creates it, not an error.
    pub async fn read(&self) -> Result<Option<RemoteBlob>, RepoStoreError> {
        let response = self
            .http
            .get(self.contents_url())
            .bearer_auth(self.credential()?)
            .header(header::ACCEPT, API_ACCEPT)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(path = %self.path, "blob not found, first write will create it");
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepoStoreError::Upstream { status, body });
        }

        let data: ContentsResponse = response.json().await?;
        let content = match data.content.as_deref() {
            Some(encoded) => decode_content(encoded)?,
            None => String::new(),
        };

        debug!(path = %self.path, bytes = content.len(), "blob fetched");
        Ok(Some(RemoteBlob {
            content,
            token: data.sha,
        }))
    }

    /// Write the full new blob content.  `token` must be the value returned
    /// by the read this write is based on, or `None` to create the blob.
    pub async fn write(
        &self,
        content: &str,
        token: Option<&str>,
        commit_message: &str,
    ) -> Result<(), RepoStoreError> {
        let payload = UpdatePayload {
            message: commit_message,
            content: BASE64.encode(content),
            sha: token,
        };

        let response = self
            .http
            .put(self.contents_url())
            .bearer_auth(self.credential()?)
            .header(header::ACCEPT, API_ACCEPT)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            return Err(RepoStoreError::Conflict { body });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepoStoreError::Upstream { status, body });
        }

        debug!(path = %self.path, bytes = content.len(), "blob written");
        Ok(())
    }

    fn credential(&self) -> Result<&str, RepoStoreError> {
        self.token.as_deref().ok_or(RepoStoreError::MissingCredential)
    }

    fn contents_url(&self) -> String {
        format!("{}/repos/{}/contents/{}", self.api_base, self.repo, self.path)
    }
}

/// Decode the API's base64 file body.  The API inserts newlines every 60
/// characters; strip all whitespace before decoding.
fn decode_content(encoded: &str) -> Result<String, RepoStoreError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| RepoStoreError::Decode(format!("base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| RepoStoreError::Decode(format!("utf-8: {e}")))
}
