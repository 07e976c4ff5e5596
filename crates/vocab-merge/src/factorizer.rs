//! Drives a factoring run from a document source to a document sink.

use serde::Serialize;
use tracing::info;
use vocab_splitter::SplitterConfig;
use vocab_store::{DocumentSink, DocumentSource};
use vocab_types::Document;

use crate::error::{MergeError, MergeResult};
use crate::factor::factor;

/// Name the master document is written under.
pub const DEFAULT_MASTER_NAME: &str = "master";

/// Summary of one factoring run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactorReport {
    /// Number of input documents.
    pub documents: usize,
    /// Name the master was written under.
    pub master_name: String,
    /// Leaves in the master document.
    pub master_leaves: usize,
    /// Leaves in each delta, in input order.
    pub deltas: Vec<DeltaSummary>,
}

/// Leaf count of one written delta.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeltaSummary {
    pub name: String,
    pub leaves: usize,
}

/// Reads every document from a source, factors them, and writes the master
/// followed by each delta to a sink.
///
/// Running twice over the same inputs writes the same outputs.
#[derive(Clone, Debug)]
pub struct Factorizer {
    config: SplitterConfig,
    master_name: String,
}

impl Default for Factorizer {
    fn default() -> Self {
        Self::new(SplitterConfig::default())
    }
}

impl Factorizer {
    /// Create a factorizer with the given splitter configuration.
    pub fn new(config: SplitterConfig) -> Self {
        Self {
            config,
            master_name: DEFAULT_MASTER_NAME.into(),
        }
    }

    /// Write the master under a different name.
    pub fn master_name(mut self, name: impl Into<String>) -> Self {
        self.master_name = name.into();
        self
    }

    /// Run the factoring algorithm from `source` into `sink`.
    pub fn run(
        &self,
        source: &dyn DocumentSource,
        sink: &dyn DocumentSink,
    ) -> MergeResult<FactorReport> {
        let documents = source.documents()?;
        if let Some(clash) = documents.iter().find(|doc| doc.name == self.master_name) {
            return Err(MergeError::NameCollision(clash.name.clone()));
        }

        let factored = factor(&documents, &self.config);
        let master_leaves = factored.master.len();
        info!(
            documents = documents.len(),
            master_leaves,
            "factored documents"
        );

        sink.write(&Document::new(
            self.master_name.clone(),
            factored.master.into_inner(),
        ))?;
        info!(name = %self.master_name, leaves = master_leaves, "master written");

        let mut deltas = Vec::with_capacity(factored.deltas.len());
        for (name, delta) in factored.deltas {
            let leaves = delta.len();
            sink.write(&Document::new(name.clone(), delta.into_inner()))?;
            info!(name = %name, leaves, "delta written");
            deltas.push(DeltaSummary { name, leaves });
        }

        Ok(FactorReport {
            documents: documents.len(),
            master_name: self.master_name.clone(),
            master_leaves,
            deltas,
        })
    }
}
