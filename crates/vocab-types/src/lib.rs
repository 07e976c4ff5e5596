//! Foundation types for vocab.
//!
//! This crate provides the addressing and document types shared by every
//! other vocab crate.
//!
//! # Key Types
//!
//! - [`Segment`] -- One step into a tree: a mapping key or a sequence index
//! - [`Path`] -- Root-relative sequence of segments addressing a leaf
//! - [`PathCodec`] -- Converts between delimiter-joined strings and [`Path`]s
//! - [`PathLike`] -- Anything accepted where a path is expected
//! - [`Document`] -- A named root mapping read from or written to a store

pub mod codec;
pub mod document;
pub mod error;
pub mod path;

pub use codec::{PathCodec, PathLike};
pub use document::{value_kind, Document};
pub use error::{TypeError, TypeResult};
pub use path::{Path, Segment};

/// The JSON-shaped value every tree is built from.
pub use serde_json::{Map, Value};
