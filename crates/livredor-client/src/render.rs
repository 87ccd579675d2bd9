//! Render the note list into the structural HTML the page injects.
//!
//! Styling belongs to the embedding page; this module only emits class
//! names.  All user-sourced text is escaped, so note content is displayed
//! verbatim (line breaks preserved via the page's `pre-wrap` rule on
//! `note-body`) and never reinterpreted as markup.

use chrono::Local;

use livredor_shared::constants::TIME_FORMAT;
use livredor_shared::Note;

/// Placeholder shown when the merged list is empty.
pub const EMPTY_PLACEHOLDER: &str = "No notes yet. Be the first to sign!";

/// A rendered list plus the status line shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    /// HTML for the note list (or a placeholder / error block).
    pub list_html: String,
    /// "Last updated: …" line, or a failure notice.
    pub updated: String,
}

impl NotesView {
    pub fn new(list_html: String) -> Self {
        Self {
            list_html,
            updated: format!("Last updated: {}", Local::now().format(TIME_FORMAT)),
        }
    }

    pub fn failed(list_html: String) -> Self {
        Self {
            list_html,
            updated: "Update failed".to_string(),
        }
    }
}

/// Render one block per note, or the empty placeholder.
pub fn notes_html(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!(r#"<div class="note-empty">{EMPTY_PLACEHOLDER}</div>"#);
    }

    notes.iter().map(note_block).collect()
}

/// Visible placeholder for a failed remote fetch when no local notes exist.
pub fn error_html(message: &str) -> String {
    format!(
        r#"<div class="note-error">Could not load notes: {}</div>"#,
        escape_html(message)
    )
}

fn note_block(note: &Note) -> String {
    format!(
        concat!(
            "<div class=\"note\">\n",
            "  <div class=\"note-meta\">",
            "<span class=\"note-author\">{author}</span>",
            "<span class=\"note-time\">{time}</span>",
            "</div>\n",
            "  <div class=\"note-body\">{content}</div>\n",
            "</div>\n",
        ),
        author = escape_html(&note.author),
        time = escape_html(&note.time),
        content = escape_html(&note.content),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
