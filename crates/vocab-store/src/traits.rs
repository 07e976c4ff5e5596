use vocab_types::Document;

use crate::error::StoreResult;

/// Somewhere documents are read from.
pub trait DocumentSource {
    /// Every document in the source, sorted by name.
    ///
    /// Returns `Err` on I/O failure or when a document is not a mapping.
    fn documents(&self) -> StoreResult<Vec<Document>>;
}

/// Somewhere documents are written to.
pub trait DocumentSink {
    /// Write one document, replacing any existing document of the same name.
    fn write(&self, document: &Document) -> StoreResult<()>;

    /// Write several documents in order.
    ///
    /// Stops at the first failure; earlier writes are not rolled back.
    fn write_all(&self, documents: &[Document]) -> StoreResult<()> {
        documents.iter().try_for_each(|doc| self.write(doc))
    }
}
