//! Domain model for guestbook notes.
//!
//! A [`Note`] carries its own identity key in `id` so that the local cache
//! round-trips it.  Remote-sourced notes derive the key from author and
//! timestamp; locally authored notes use a creation-time token, so a
//! visitor's own note keeps its identity until the remote copy supersedes
//! it on a later fetch.

use chrono::{Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TIME_FORMAT;

/// A single guestbook note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    /// Deduplication identity key (see [`remote_identity`]).
    pub id: String,
    /// Visitor display name.
    pub author: String,
    /// Note body, at most 500 characters.
    pub content: String,
    /// Human-readable creation time (`%Y-%m-%d %H:%M:%S`).
    pub time: String,
}

impl Note {
    /// Build a note as read from (or destined for) the remote blob.
    /// The identity key is derived from author and timestamp.
    pub fn remote(
        author: impl Into<String>,
        time: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let author = author.into();
        let time = time.into();
        Self {
            id: remote_identity(&author, &time),
            author,
            time,
            content: content.into(),
        }
    }

    /// Build a note destined for the remote blob, stamped with the current
    /// UTC time.  Used by the submission endpoint.
    pub fn remote_now(author: impl Into<String>, content: impl Into<String>) -> Self {
        let time = Utc::now().format(TIME_FORMAT).to_string();
        Self::remote(author, time, content)
    }

    /// Build a locally authored note, stamped with the device clock.
    /// The identity key is the creation instant in Unix milliseconds, so
    /// it never collides with a remote key.
    pub fn local(author: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            id: now.timestamp_millis().to_string(),
            author: author.into(),
            time: now.format(TIME_FORMAT).to_string(),
            content: content.into(),
        }
    }

    /// Parse the timestamp string for ordering.  `None` for anything that
    /// does not match the shared format; callers sort such notes as oldest.
    pub fn parsed_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.time.trim(), TIME_FORMAT).ok()
    }
}

/// Identity key for a remote-sourced note: author and timestamp joined,
/// with every whitespace character removed.
pub fn remote_identity(author: &str, time: &str) -> String {
    format!("{author}-{time}")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
