//! Startup corpus ingestion.
//!
//! Reads a CSV with `Title` and `Content` columns, embeds each row's
//! content, and writes the result to both the vector index and the local
//! document store. Row ids are derived from the row index (`vec_{idx}`),
//! so re-running ingestion over the same source produces the same ids and
//! the upserts overwrite in place.

use crate::db::{DocumentStore, VectorStore};
use crate::rag::embeddings::EmbeddingProvider;
use crate::types::{AppError, Document, Result, VectorMetadata, VectorRecord};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Content")]
    content: String,
}

/// Ingest a CSV corpus into the vector index and document store.
///
/// Returns the number of documents ingested.
pub async fn ingest_csv(
    path: &Path,
    embeddings: &dyn EmbeddingProvider,
    vectors: &dyn VectorStore,
    documents: &DocumentStore,
    namespace: &str,
) -> Result<usize> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        AppError::Configuration(format!("cannot open corpus '{}': {}", path.display(), e))
    })?;

    let mut records: Vec<VectorRecord> = Vec::new();
    for (idx, row) in reader.deserialize::<CorpusRow>().enumerate() {
        let row = row
            .map_err(|e| AppError::InvalidInput(format!("corpus row {}: {}", idx, e)))?;

        let doc_id = format!("vec_{}", idx);
        let values = embeddings.embed(&row.content).await?;

        records.push(VectorRecord {
            id: doc_id.clone(),
            values,
            metadata: VectorMetadata {
                title: row.title.clone(),
            },
        });
        documents.put(Document {
            id: doc_id,
            title: row.title,
            content: row.content,
        });
    }

    let count = vectors.upsert(namespace, &records).await?;
    info!(count, namespace, "ingested corpus");

    Ok(count)
}
