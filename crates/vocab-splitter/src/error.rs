//! Error types for the splitter crate.

use vocab_types::TypeError;

/// Errors that can occur while reading or writing a splitter by path.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Path parsing or root construction failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// No leaf exists at the requested path.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The empty path addresses the root, which is never a leaf.
    #[error("the empty path does not address a leaf")]
    EmptyPath,

    /// The path's shape cannot be applied to the tree.
    #[error("type mismatch at {path}: {reason}")]
    TypeMismatch { path: String, reason: &'static str },
}

/// Convenience alias for splitter results.
pub type SplitResult<T> = Result<T, SplitError>;
