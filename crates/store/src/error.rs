//! Store-layer errors.

use thiserror::Error;

use crate::store::PathError;

/// Errors surfaced by the document store and repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document exists but does not decode into its expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested document was not found.
    ///
    /// Distinct from an access denial: callers translate this to 404 and a
    /// denial to 403, never conflating the two.
    #[error("not found")]
    NotFound,

    /// A document already exists at the target path.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A malformed document or collection path.
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),
}
