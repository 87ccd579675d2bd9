//! # livredor-store
//!
//! Local per-device cache for the Livredor guestbook, backed by SQLite.
//!
//! The browser original kept the visitor's own notes in a single
//! localStorage slot.  This crate reproduces that contract: a [`Database`]
//! handle exposes a named key-value slot (`get_slot` / `set_slot`), and
//! the note cache is one JSON-encoded array stored in it, replaced
//! wholesale on every save.

pub mod cache;
pub mod database;

mod error;

pub use database::Database;
pub use error::StoreError;
