use std::collections::BTreeMap;
use std::sync::RwLock;

use vocab_types::Document;

use crate::error::{StoreError, StoreResult};
use crate::traits::{DocumentSink, DocumentSource};

/// In-memory, name-ordered document store.
///
/// Intended for tests and embedding. Documents are held behind a `RwLock`
/// and cloned on read/write. It is both a source and a sink, so a factoring
/// run can read and write the same store.
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<String, Document>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store holding the given documents.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let map = documents
            .into_iter()
            .map(|doc| (doc.name.clone(), doc))
            .collect();
        Self {
            documents: RwLock::new(map),
        }
    }

    /// Read one document by name.
    pub fn read(&self, name: &str) -> StoreResult<Document> {
        self.documents
            .read()
            .expect("lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::DocumentNotFound(name.to_string()))
    }

    /// Sorted list of all document names.
    pub fn names(&self) -> Vec<String> {
        self.documents
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for InMemoryDocumentStore {
    fn documents(&self) -> StoreResult<Vec<Document>> {
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.values().cloned().collect())
    }
}

impl DocumentSink for InMemoryDocumentStore {
    fn write(&self, document: &Document) -> StoreResult<()> {
        let mut map = self.documents.write().expect("lock poisoned");
        map.insert(document.name.clone(), document.clone());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &self.len())
            .finish()
    }
}
