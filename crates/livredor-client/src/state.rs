//! Application state shared with the embedding page shell.
//!
//! [`AppState`] owns the injected cache handle, one HTTP client, and the
//! transient feedback slot.  The shell calls [`AppState::initial_view`]
//! on load, [`AppState::refreshed_view`] once the remote fetch should
//! run, and [`AppState::submit`] when the form is posted.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use livredor_shared::codec;
use livredor_shared::Note;
use livredor_store::Database;

use crate::compose::{clamp_draft, validate_draft, Feedback, FEEDBACK_CLEAR_DELAY};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::notes::merge_notes;
use crate::render::{self, NotesView};

/// Central display-side state.
pub struct AppState {
    /// Handle to the local note cache.
    /// `None` when the device has no usable storage; the guestbook then
    /// runs remote-only.
    pub database: Option<Database>,

    /// Shared HTTP client for the raw blob fetch and submissions.
    pub http: reqwest::Client,

    /// Display-side configuration (blob URL, submit endpoint).
    pub config: ClientConfig,

    /// Currently visible submit-result banner, auto-cleared after
    /// [`FEEDBACK_CLEAR_DELAY`].
    feedback: Arc<Mutex<Option<Feedback>>>,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    author: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct SubmitOk {
    success: bool,
    message: String,
}

#[derive(Deserialize)]
struct SubmitErr {
    error: String,
}

impl AppState {
    /// Create a new state without a cache attached.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            database: None,
            http: reqwest::Client::new(),
            config,
            feedback: Arc::new(Mutex::new(None)),
        }
    }

    /// Attach the local note cache.
    pub fn with_cache(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// The visitor's locally authored notes, newest first.
    pub fn local_notes(&self) -> Result<Vec<Note>, ClientError> {
        match &self.database {
            Some(db) => Ok(db.load_notes()?),
            None => Ok(Vec::new()),
        }
    }

    /// First render on page load: local cache only, before any network I/O.
    pub fn initial_view(&self) -> Result<NotesView, ClientError> {
        let local = self.local_notes()?;
        Ok(NotesView::new(render::notes_html(&local)))
    }

    /// Fetch and decode the public note blob.
    pub async fn fetch_remote(&self) -> Result<Vec<Note>, ClientError> {
        let text = self
            .http
            .get(&self.config.note_file_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(codec::decode(&text))
    }

    /// Re-render once the remote fetch resolves: merged list on success;
    /// on failure keep showing local notes if there are any, otherwise a
    /// visible error placeholder.  Never retried automatically.
    pub async fn refreshed_view(&self) -> Result<NotesView, ClientError> {
        let local = self.local_notes()?;

        match self.fetch_remote().await {
            Ok(remote) => {
                let merged = merge_notes(remote, local);
                info!(count = merged.len(), "rendered merged notes");
                Ok(NotesView::new(render::notes_html(&merged)))
            }
            Err(e) => {
                warn!(error = %e, "remote note fetch failed");
                if local.is_empty() {
                    Ok(NotesView::failed(render::error_html(&e.to_string())))
                } else {
                    Ok(NotesView::new(render::notes_html(&local)))
                }
            }
        }
    }

    /// Submit a new note: validate, optimistically prepend it to the local
    /// cache (visible before the remote write confirms), then post it to
    /// the submission endpoint.  The outcome becomes the feedback banner.
    pub async fn submit(&self, author: &str, content: &str) -> Feedback {
        let author = author.trim();
        let draft = clamp_draft(content.trim());

        if let Err(message) = validate_draft(author, &draft.content) {
            return self.publish(Feedback::error(message));
        }

        let note = Note::local(author, draft.content);

        // Optimistic insert, bypassing the sort: the new note goes straight
        // to the front of the visitor's own list.
        if let Some(db) = &self.database {
            match db.load_notes() {
                Ok(mut notes) => {
                    notes.insert(0, note.clone());
                    if let Err(e) = db.save_notes(&notes) {
                        warn!(error = %e, "failed to cache submitted note");
                    }
                }
                Err(e) => warn!(error = %e, "failed to read note cache"),
            }
        }

        let feedback = match self.post_submission(&note).await {
            Ok(message) => Feedback::success(message),
            Err(e) => Feedback::error(e.to_string()),
        };
        self.publish(feedback)
    }

    async fn post_submission(&self, note: &Note) -> Result<String, ClientError> {
        let body = SubmitBody {
            author: &note.author,
            content: &note.content,
        };

        let response = self
            .http
            .post(&self.config.submit_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let ok: SubmitOk = response.json().await?;
            if ok.success {
                Ok(ok.message)
            } else {
                Err(ClientError::Api(ok.message))
            }
        } else {
            let message = response
                .json::<SubmitErr>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("Submission failed ({status})"));
            Err(ClientError::Api(message))
        }
    }

    /// The currently visible feedback banner, if any.
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback.lock().ok().and_then(|guard| guard.clone())
    }

    /// Publish a banner and schedule its auto-clear.
    fn publish(&self, feedback: Feedback) -> Feedback {
        if let Ok(mut guard) = self.feedback.lock() {
            *guard = Some(feedback.clone());
        }

        let slot = Arc::clone(&self.feedback);
        tokio::spawn(async move {
            tokio::time::sleep(FEEDBACK_CLEAR_DELAY).await;
            if let Ok(mut guard) = slot.lock() {
                *guard = None;
            }
        });

        feedback
    }
}
