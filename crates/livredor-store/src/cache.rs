//! Note cache operations on top of the key-value slot.

use livredor_shared::constants::NOTES_CACHE_SLOT;
use livredor_shared::Note;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Load the visitor's locally authored notes, newest first.
    ///
    /// A slot that has never been written yields an empty list.  A slot
    /// whose JSON no longer parses is a hard error (`StoreError::Json`).
    pub fn load_notes(&self) -> Result<Vec<Note>> {
        match self.get_slot(NOTES_CACHE_SLOT)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the full ordered note list, replacing any prior value.
    pub fn save_notes(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)?;
        self.set_slot(NOTES_CACHE_SLOT, &json)?;
        tracing::debug!(count = notes.len(), "saved note cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("cache.db")).unwrap();
        (db, dir)
    }

    #[test]
    fn empty_cache_loads_as_empty_list() {
        let (db, _dir) = test_db();
        assert!(db.load_notes().unwrap().is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let (db, _dir) = test_db();
        let notes = vec![
            Note::local("Alice", "first!"),
            Note::remote("Bob", "2024-01-01 10:00:00", "bienvenue"),
        ];

        db.save_notes(&notes).unwrap();
        assert_eq!(db.load_notes().unwrap(), notes);
    }

    #[test]
    fn save_replaces_previous_list() {
        let (db, _dir) = test_db();
        db.save_notes(&[Note::local("Alice", "one")]).unwrap();
        db.save_notes(&[]).unwrap();
        assert!(db.load_notes().unwrap().is_empty());
    }

    #[test]
    fn corrupt_slot_is_a_hard_error() {
        let (db, _dir) = test_db();
        db.set_slot(NOTES_CACHE_SLOT, "{not json").unwrap();

        match db.load_notes() {
            Err(StoreError::Json(_)) => {}
            other => panic!("expected Json error, got {other:?}"),
        }
    }
}
