//! HTTP API: the note submission endpoint.
//!
//! A submission walks validate → fetch → append → write, short-circuiting
//! into an error response at the first failing step.  Deduplication never
//! happens here: the blob is append-only and the display side dedups at
//! render time.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use livredor_shared::codec;
use livredor_shared::constants::MAX_CONTENT_CHARS;
use livredor_shared::Note;

use crate::blob_store::RepoBlobStore;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub blob_store: Arc<RepoBlobStore>,
}

pub fn build_router(state: AppState) -> Router {
    // The page is served from elsewhere; every response (pre-flight
    // included) must carry these headers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_check))
        .route("/submit", post(submit_note))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Missing body fields deserialize to empty strings so they fall through
/// to validation instead of a framework rejection.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SubmitRequest {
    pub author: String,
    pub content: String,
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn submit_note(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ServerError> {
    let (author, content) = validate_submission(&req)?;

    // Fetch the current blob and its optimistic token.  A missing blob is
    // the first-ever write, not an error; a missing credential surfaces
    // here, before any request leaves the process.
    let existing = state.blob_store.read().await?;
    let (current, token) = match &existing {
        Some(blob) => (blob.content.as_str(), Some(blob.token.as_str())),
        None => ("", None),
    };

    let note = Note::remote_now(&author, &content);
    let updated = format!("{current}{}", codec::encode(&note));

    state
        .blob_store
        .write(&updated, token, &commit_message(&author))
        .await?;

    info!(author = %author, chars = content.chars().count(), "note appended");

    Ok(Json(SubmitResponse {
        success: true,
        message: "Note submitted successfully!".to_string(),
    }))
}

/// Validate and normalize a submission.  Runs before any upstream call;
/// each rejection carries its own message so the visitor knows what to fix.
fn validate_submission(req: &SubmitRequest) -> Result<(String, String), ServerError> {
    let author = req.author.trim();
    let content = req.content.trim();

    if author.is_empty() {
        return Err(ServerError::Validation("Author must not be empty".into()));
    }
    if content.is_empty() {
        return Err(ServerError::Validation("Content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ServerError::Validation(format!(
            "Content must not exceed {MAX_CONTENT_CHARS} characters"
        )));
    }

    Ok((author.to_string(), content.to_string()))
}

/// Every blob write is attributed with a commit message naming the author.
fn commit_message(author: &str) -> String {
    format!("Add guestbook note - {author}")
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(author: &str, content: &str) -> SubmitRequest {
        SubmitRequest {
            author: author.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn accepts_valid_submission_and_trims() {
        let (author, content) = validate_submission(&request("  Alice ", " Hi there ")).unwrap();
        assert_eq!(author, "Alice");
        assert_eq!(content, "Hi there");
    }

    #[test]
    fn rejects_empty_author() {
        let err = validate_submission(&request("   ", "Hi")).unwrap_err();
        assert!(err.to_string().contains("Author"));
    }

    #[test]
    fn rejects_empty_content() {
        let err = validate_submission(&request("Alice", "  ")).unwrap_err();
        assert!(err.to_string().contains("Content must not be empty"));
    }

    #[test]
    fn rejects_over_length_content() {
        let long = "x".repeat(MAX_CONTENT_CHARS + 1);
        let err = validate_submission(&request("Alice", &long)).unwrap_err();
        assert!(err.to_string().contains("exceed"));

        // Exactly at the bound is fine.
        let exact = "x".repeat(MAX_CONTENT_CHARS);
        assert!(validate_submission(&request("Alice", &exact)).is_ok());
    }

    #[test]
    fn length_bound_counts_chars_not_bytes() {
        // 500 multi-byte characters are within the bound.
        let content = "é".repeat(MAX_CONTENT_CHARS);
        assert!(validate_submission(&request("Alice", &content)).is_ok());
    }

    #[test]
    fn missing_body_fields_become_empty_strings() {
        let req: SubmitRequest = serde_json::from_str("{}").unwrap();
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn commit_message_names_author() {
        assert_eq!(commit_message("Alice"), "Add guestbook note - Alice");
    }
}

/// End-to-end tests: the real router and blob store client talking to an
/// in-process mock of the content API.
#[cfg(test)]
mod endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    use super::*;
    use crate::config::ServerConfig;

    /// In-memory stand-in for the content API: one blob, sha bumped on
    /// every write, stale-sha writes rejected with 409.
    #[derive(Clone, Default)]
    struct MockRepo {
        /// (base64 content, sha)
        blob: Arc<Mutex<Option<(String, String)>>>,
        reads: Arc<Mutex<usize>>,
        writes: Arc<Mutex<usize>>,
        reject_writes: Arc<Mutex<bool>>,
    }

    impl MockRepo {
        fn text(&self) -> String {
            let blob = self.blob.lock().unwrap();
            match &*blob {
                Some((encoded, _)) => {
                    String::from_utf8(BASE64.decode(encoded.as_bytes()).unwrap()).unwrap()
                }
                None => String::new(),
            }
        }

        fn reads(&self) -> usize {
            *self.reads.lock().unwrap()
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    async fn mock_read(State(repo): State<MockRepo>) -> axum::response::Response {
        *repo.reads.lock().unwrap() += 1;
        match repo.blob.lock().unwrap().clone() {
            Some((content, sha)) => {
                Json(serde_json::json!({ "content": content, "sha": sha })).into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn mock_write(
        State(repo): State<MockRepo>,
        Json(payload): Json<serde_json::Value>,
    ) -> axum::response::Response {
        *repo.writes.lock().unwrap() += 1;
        if *repo.reject_writes.lock().unwrap() {
            return (StatusCode::CONFLICT, "stale token").into_response();
        }

        let mut blob = repo.blob.lock().unwrap();
        if let Some((_, sha)) = &*blob {
            if payload["sha"].as_str() != Some(sha.as_str()) {
                return (StatusCode::CONFLICT, "stale token").into_response();
            }
        }

        let content = payload["content"].as_str().unwrap_or_default().to_string();
        let new_sha = format!("sha-{}", *repo.writes.lock().unwrap());
        *blob = Some((content, new_sha.clone()));
        Json(serde_json::json!({ "content": { "sha": new_sha } })).into_response()
    }

    /// Spin up the mock API and the real endpoint; return the endpoint's
    /// base URL.
    async fn start_stack(repo: MockRepo, with_credential: bool) -> String {
        let defaults = ServerConfig::default();
        let contents_route = format!("/repos/{}/contents/{}", defaults.repo, defaults.note_path);

        let mock_router = Router::new()
            .route(&contents_route, get(mock_read).put(mock_write))
            .with_state(repo);
        let mock_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mock_addr = mock_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(mock_listener, mock_router).await.unwrap();
        });

        let config = ServerConfig {
            api_base: format!("http://{mock_addr}"),
            api_token: with_credential.then(|| "test-token".to_string()),
            ..defaults
        };
        let state = AppState {
            blob_store: Arc::new(RepoBlobStore::new(&config).unwrap()),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn post_note(base: &str, author: &str, content: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{base}/submit"))
            .json(&serde_json::json!({ "author": author, "content": content }))
            .send()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn submission_appends_a_decodable_block() {
        let repo = MockRepo::default();
        let base = start_stack(repo.clone(), true).await;

        let response = post_note(&base, "Alice", "Hello from the tests").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);

        let notes = codec::decode(&repo.text());
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].author, "Alice");
        assert_eq!(notes[0].content, "Hello from the tests");
    }

    #[tokio::test]
    async fn second_submission_appends_with_the_fresh_token() {
        let repo = MockRepo::default();
        let base = start_stack(repo.clone(), true).await;

        post_note(&base, "Alice", "first").await;
        let response = post_note(&base, "Bob", "second").await;
        assert_eq!(response.status(), StatusCode::OK);

        // The mock rejects writes with a stale sha, so two successes prove
        // the token round-trip.
        let notes = codec::decode(&repo.text());
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].author, "Alice");
        assert_eq!(notes[1].author, "Bob");
        assert_eq!(repo.writes(), 2);
    }

    #[tokio::test]
    async fn invalid_submission_never_reaches_upstream() {
        let repo = MockRepo::default();
        let base = start_stack(repo.clone(), true).await;

        let response = post_note(&base, "", "Hi").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Author must not be empty");

        let response = post_note(&base, "Alice", &"x".repeat(501)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(repo.reads(), 0);
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn missing_credential_is_a_generic_500() {
        let repo = MockRepo::default();
        let base = start_stack(repo.clone(), false).await;

        let response = post_note(&base, "Alice", "Hi").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Server configuration error");
        assert_eq!(repo.reads(), 0);
    }

    #[tokio::test]
    async fn write_conflict_surfaces_upstream_text() {
        let repo = MockRepo::default();
        *repo.reject_writes.lock().unwrap() = true;
        let base = start_stack(repo.clone(), true).await;

        let response = post_note(&base, "Alice", "Hi").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json().await.unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("conflict"));
        assert!(message.contains("stale token"));
    }

    #[tokio::test]
    async fn preflight_gets_permissive_cors_headers() {
        let repo = MockRepo::default();
        let base = start_stack(repo, true).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/submit"))
            .header("Origin", "https://example.org")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let methods = headers["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("POST"));
        assert!(methods.contains("GET"));
        assert!(methods.contains("OPTIONS"));
    }
}
