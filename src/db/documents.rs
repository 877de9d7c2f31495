//! Local document store.
//!
//! Maps document ids to their full text. Populated once during ingestion and
//! treated as read-only for the rest of the process lifetime; the pipeline
//! receives it behind an `Arc` so there is no hidden global to race on.

use crate::types::{AppError, Document, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Id-keyed store of ingested documents.
#[derive(Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document; an existing id is replaced.
    pub fn put(&self, document: Document) {
        self.documents
            .write()
            .insert(document.id.clone(), document);
    }

    /// Fetch a document by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has not been ingested —
    /// callers decide whether that is fatal (it is not, for retrieval).
    pub fn get(&self, id: &str) -> Result<Document> {
        self.documents
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("document '{}'", id)))
    }

    /// Number of ingested documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// True when nothing has been ingested yet.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}
