//! The factoring fold.
//!
//! 1. Wrap each document as a [`Splitter`].
//! 2. Fold [`shared_subset`] left to right, starting from the first
//!    document, to get the master.
//! 3. Each delta is [`difference`]`(document, master)`.
//!
//! Every leaf of a document is either equal at its path in the master or
//! present in the delta, never both, so [`reconstruct`] restores the
//! document's leaf set. Two cases fall outside that guarantee: a `null`
//! leaf that only a delta holds (merge skips `null`s), and a sequence whose
//! elements agree only partially across documents (rebuilt sequences
//! append rather than pad).

use tracing::debug;
use vocab_splitter::{difference, merge, shared_subset, Splitter, SplitterConfig};
use vocab_types::Document;

/// The outcome of factoring a set of documents.
#[derive(Clone, Debug, PartialEq)]
pub struct Factored {
    /// Leaves shared by every document.
    pub master: Splitter,
    /// One `(name, delta)` per input document, in input order.
    pub deltas: Vec<(String, Splitter)>,
}

impl Factored {
    /// Look up the delta for a document by name.
    pub fn delta(&self, name: &str) -> Option<&Splitter> {
        self.deltas
            .iter()
            .find(|(delta_name, _)| delta_name == name)
            .map(|(_, delta)| delta)
    }
}

/// Factor `documents` into a master and one delta per document.
///
/// With no documents, the master is empty and there are no deltas.
pub fn factor(documents: &[Document], config: &SplitterConfig) -> Factored {
    let splitters: Vec<Splitter> = documents
        .iter()
        .map(|doc| Splitter::with_config(doc.root.clone(), config.clone()))
        .collect();

    let master = match splitters.split_first() {
        None => Splitter::empty(config.clone()),
        Some((first, rest)) => rest.iter().zip(&documents[1..]).fold(
            first.clone(),
            |acc, (next, doc)| {
                let shared = shared_subset(&acc, next);
                debug!(document = %doc.name, shared = shared.len(), "folded into master");
                shared
            },
        ),
    };

    let deltas = documents
        .iter()
        .zip(&splitters)
        .map(|(doc, splitter)| (doc.name.clone(), difference(splitter, &master)))
        .collect();

    Factored { master, deltas }
}

/// Rebuild a document from the master and its delta.
pub fn reconstruct(master: &Splitter, delta: &Splitter) -> Splitter {
    merge(master, delta)
}
