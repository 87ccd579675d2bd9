//! # livredor-client
//!
//! Display side of the Livredor guestbook, as a headless library the page
//! shell embeds.
//!
//! Two independent producers feed one render sink: the local cache is
//! rendered immediately on load, and the remote blob fetch re-renders the
//! merged list when it resolves.  Remote-sourced notes win identity-key
//! collisions; no further synchronization exists, so a late fetch may
//! briefly replace a just-submitted optimistic note until it round-trips
//! through the blob.

pub mod compose;
pub mod config;
pub mod notes;
pub mod render;
pub mod state;

mod error;

pub use config::ClientConfig;
pub use error::ClientError;
pub use state::AppState;
