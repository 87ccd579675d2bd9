//! Plain-text codec for the remote note blob.
//!
//! The blob is an append-log: one block per note, blocks separated by a
//! blank line, each block three labelled lines (content may span more).
//! The labels and field order are load-bearing: data already stored in
//! the blob must keep decoding across releases.
//!
//! Decoding is deliberately tolerant: extra blank lines, trailing
//! whitespace, and partial or label-less blocks never produce an error.
//! A block that ends up without an author or without content is dropped
//! as malformed/legacy data.

use crate::constants::{AUTHOR_LABEL, CONTENT_LABEL, TIME_LABEL};
use crate::types::Note;

/// Serialize a note into its blob block, trailing blank line included.
pub fn encode(note: &Note) -> String {
    format!(
        "{AUTHOR_LABEL}{}\n{TIME_LABEL}{}\n{CONTENT_LABEL}{}\n\n",
        note.author, note.time, note.content
    )
}

/// Parse a whole blob into notes, skipping malformed blocks.
pub fn decode(text: &str) -> Vec<Note> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    // Splitting on a single blank line and trimming each piece also
    // absorbs runs of three or more newlines between blocks.
    text.split("\n\n").filter_map(parse_block).collect()
}

fn parse_block(block: &str) -> Option<Note> {
    let block = block.trim();
    if block.is_empty() {
        return None;
    }

    let mut lines = block.lines();
    let author = strip_label(lines.next()?, AUTHOR_LABEL);
    let time = lines.next().map(|l| strip_label(l, TIME_LABEL)).unwrap_or_default();
    let content = {
        let rest: Vec<&str> = lines.collect();
        let joined = rest.join("\n");
        let joined = joined.strip_prefix(CONTENT_LABEL).unwrap_or(&joined);
        joined.trim().to_string()
    };

    if author.is_empty() || content.is_empty() {
        return None;
    }

    Some(Note::remote(author, time, content))
}

/// Strip a field label if present; a label-less line is used as-is so
/// legacy blobs written without labels still decode.
fn strip_label(line: &str, label: &str) -> String {
    line.strip_prefix(label).unwrap_or(line).trim().to_string()
}
