//! Merge engine: deduplicated union of remote and local notes.

use std::collections::HashSet;

use livredor_shared::Note;

/// Merge remote-parsed and locally cached notes into one deduplicated
/// list, most recent first.
///
/// Remote notes are inserted first, so on an identity-key collision the
/// remote copy wins.  Notes whose timestamp does not parse sort as oldest
/// (the descending sort places them last); ties keep remote-then-local
/// insertion order.
pub fn merge_notes(remote: Vec<Note>, local: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Note> = Vec::with_capacity(remote.len() + local.len());

    for note in remote.into_iter().chain(local) {
        if seen.insert(note.id.clone()) {
            merged.push(note);
        }
    }

    // `None < Some(_)`, so comparing b to a puts newest first and
    // unparsable times last.
    merged.sort_by(|a, b| b.parsed_time().cmp(&a.parsed_time()));
    merged
}
