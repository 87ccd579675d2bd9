//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! the schema exists before any other operation.  The schema is a single
//! key-value table of named JSON slots, the same contract the browser
//! original had with localStorage, which lets callers treat storage as an
//! injected `get(key)` / `set(key, json)` capability.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/livredor/livredor.db`
    /// - macOS:   `~/Library/Application Support/com.livredor.livredor/livredor.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\livredor\livredor\data\livredor.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "livredor", "livredor").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("livredor.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_slots (
                key  TEXT PRIMARY KEY,
                json TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    /// Read a named slot, `None` if it has never been written.
    pub fn get_slot(&self, key: &str) -> Result<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT json FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(json)
    }

    /// Replace a named slot with a new JSON payload.
    pub fn set_slot(&self, key: &str, json: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_slots (key, json) VALUES (?1, ?2)",
            params![key, json],
        )?;
        Ok(())
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}
