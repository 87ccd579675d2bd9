use thiserror::Error;

use livredor_store::StoreError;

/// Errors produced by the display side.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local cache failure (including corrupt cache JSON).
    #[error("Local cache error: {0}")]
    Store(#[from] StoreError),

    /// Remote fetch or submission transport failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The submission endpoint answered with an error body.
    #[error("{0}")]
    Api(String),
}
