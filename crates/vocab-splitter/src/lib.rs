//! Path-flattening engine for vocab.
//!
//! A [`Splitter`] wraps one root mapping and views it as a flat set of
//! `(Path, leaf)` pairs. On top of that view it offers path-addressed
//! reads and writes and three structural set operations used to factor
//! many similar documents into a shared master plus per-document deltas.
//!
//! # Key Types
//!
//! - [`SplitterConfig`] -- Path codec plus the list-conversion switch
//! - [`Leaves`] -- Depth-first iterator over `(Path, &Value)` leaf pairs
//! - [`Splitter`] -- Owned root with `get` / `set` / `delete` by path
//! - [`shared_subset`] / [`difference`] / [`merge`] -- Set operations over leaves

pub mod config;
pub mod error;
pub mod leaves;
pub mod ops;
pub mod splitter;

pub use config::SplitterConfig;
pub use error::{SplitError, SplitResult};
pub use leaves::Leaves;
pub use ops::{difference, merge, shared_subset};
pub use splitter::Splitter;
