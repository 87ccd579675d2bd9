//! # livredor-shared
//!
//! Domain types and the note text codec shared by every Livredor crate.
//!
//! The guestbook persists notes in a single plain-text file ("the blob")
//! hosted in a source repository.  This crate owns the [`Note`] entity,
//! the identity keys used for deduplication, and the append-log text
//! format the blob is written in.

pub mod codec;
pub mod constants;
pub mod types;

pub use types::Note;
