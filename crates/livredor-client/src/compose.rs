//! Submission-form helpers: draft clamping, the character counter, local
//! validation, and the transient feedback banner.

use std::time::Duration;

use livredor_shared::constants::MAX_CONTENT_CHARS;

/// How long a feedback banner stays visible before auto-clearing.
pub const FEEDBACK_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// A draft after clamping, plus the counter string the page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub content: String,
    pub counter: String,
}

/// Truncate the draft at the content bound as the visitor types and
/// produce the "N/500" counter.
pub fn clamp_draft(input: &str) -> Draft {
    let content: String = input.chars().take(MAX_CONTENT_CHARS).collect();
    let count = content.chars().count();
    Draft {
        content,
        counter: format!("{count}/{MAX_CONTENT_CHARS}"),
    }
}

/// Client-side validation, mirroring the endpoint's rules and messages so
/// the visitor gets the same answer without a round trip.
pub fn validate_draft(author: &str, content: &str) -> Result<(), String> {
    if author.trim().is_empty() {
        return Err("Author must not be empty".to_string());
    }
    if content.trim().is_empty() {
        return Err("Content must not be empty".to_string());
    }
    if content.trim().chars().count() > MAX_CONTENT_CHARS {
        return Err(format!("Content must not exceed {MAX_CONTENT_CHARS} characters"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Transient submit-result banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }
}
