//! Document storage for vocab.
//!
//! The factoring algorithm reads named root mappings from a
//! [`DocumentSource`] and writes the master and delta documents to a
//! [`DocumentSink`]. This crate defines both traits and two backends.
//!
//! # Storage Backends
//!
//! - [`InMemoryDocumentStore`] -- name-ordered map for tests and embedding
//! - [`JsonDirectory`] -- one `<name>.json` file per document in a directory
//!
//! # Design Rules
//!
//! 1. Sources return documents in a deterministic order (sorted by name).
//! 2. Every document root is a mapping; anything else is rejected on read.
//! 3. All I/O errors are propagated, never silently ignored.

pub mod directory;
pub mod error;
pub mod memory;
pub mod traits;

pub use directory::{read_document, JsonDirectory};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
pub use traits::{DocumentSink, DocumentSource};
