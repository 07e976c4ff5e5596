/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested document was not found.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The document decoded to something other than a mapping.
    #[error("document {name} is not a mapping (found {actual})")]
    NotAMapping { name: String, actual: &'static str },

    /// Encoding or decoding JSON failed.
    #[error("serialization error in {name}: {reason}")]
    Serialization { name: String, reason: String },

    /// Directory traversal failed.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
