//! Master/delta factoring for vocab.
//!
//! Given several structurally similar documents, computes one master
//! document holding every leaf all of them agree on, plus one delta per
//! document holding the rest. Merging the master with a delta reconstructs
//! that document.

pub mod error;
pub mod factor;
pub mod factorizer;

pub use error::{MergeError, MergeResult};
pub use factor::{factor, reconstruct, Factored};
pub use factorizer::{DeltaSummary, FactorReport, Factorizer, DEFAULT_MASTER_NAME};
