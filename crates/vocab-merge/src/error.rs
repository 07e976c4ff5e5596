//! Error types for the merge crate.

use thiserror::Error;

/// Errors that can occur while factoring documents.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An input document has the same name as the master document, so
    /// writing the master would overwrite its delta.
    #[error("input document {0:?} collides with the master document name")]
    NameCollision(String),

    /// Reading or writing documents failed.
    #[error("store error: {0}")]
    Store(#[from] vocab_store::StoreError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
