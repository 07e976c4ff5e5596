//! JSON-file backend.
//!
//! A directory is a source of its non-recursive `*.json` entries and a sink
//! that writes `<name>.json` files. Symlinked entries are followed. Document names are file stems, so
//! `conf1.json` is read as `conf1` and written back to `conf1.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};
use vocab_types::{value_kind, Document};
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::traits::{DocumentSink, DocumentSource};

const JSON_EXTENSION: &str = "json";

/// A directory of JSON documents.
#[derive(Clone, Debug)]
pub struct JsonDirectory {
    dir: PathBuf,
    pretty: bool,
}

impl JsonDirectory {
    /// Use an existing directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: false,
        }
    }

    /// Use a directory, creating it (and its parents) if absent.
    pub fn create(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(dir = %dir.display(), "created output directory");
        }
        Ok(Self::new(dir))
    }

    /// Write indented JSON instead of compact JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Where a document of the given name is written.
    pub fn document_path(&self, name: &str) -> PathBuf {
        let file = if Path::new(name).extension().is_some_and(|ext| ext == JSON_EXTENSION) {
            name.to_string()
        } else {
            format!("{name}.{JSON_EXTENSION}")
        };
        self.dir.join(file)
    }
}

impl DocumentSource for JsonDirectory {
    fn documents(&self) -> StoreResult<Vec<Document>> {
        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path.extension().map_or(true, |ext| ext != JSON_EXTENSION) {
                debug!(path = %path.display(), "skipping non-JSON entry");
                continue;
            }
            documents.push(read_document(path)?);
        }

        if documents.is_empty() {
            warn!(dir = %self.dir.display(), "no JSON documents found");
        }
        Ok(documents)
    }
}

impl DocumentSink for JsonDirectory {
    fn write(&self, document: &Document) -> StoreResult<()> {
        let path = self.document_path(&document.name);
        let encoded = if self.pretty {
            serde_json::to_string_pretty(&document.root)
        } else {
            serde_json::to_string(&document.root)
        }
        .map_err(|e| StoreError::Serialization {
            name: document.name.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, encoded)?;
        debug!(path = %path.display(), "document written");
        Ok(())
    }
}

/// Read a single JSON file as a document named after its file stem.
pub fn read_document(path: &Path) -> StoreResult<Document> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| StoreError::Serialization {
        name: name.clone(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(root) => Ok(Document::new(name, root)),
        other => Err(StoreError::NotAMapping {
            name,
            actual: value_kind(&other),
        }),
    }
}
