use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed path {path:?}: segment {segment:?} is not a valid list index")]
    MalformedPath { path: String, segment: String },

    #[error("{0} must not be empty")]
    EmptyDelimiter(&'static str),

    #[error("list marker {list_marker:?} contains the key delimiter {key_delimiter:?}")]
    DelimiterClash {
        key_delimiter: String,
        list_marker: String,
    },

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
