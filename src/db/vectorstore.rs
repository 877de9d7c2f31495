//! Vector index abstraction.
//!
//! This module provides the [`VectorStore`] trait the retrieval pipeline
//! queries, plus the embedded [`InMemoryVectorStore`] backend. The store is
//! partitioned by namespace: queries never cross namespaces, and unrelated
//! document collections can share one index.
//!
//! The similarity metric is fixed as cosine for the lifetime of a store, and
//! so is the vector dimensionality: any vector crossing this boundary with
//! the wrong length fails with [`AppError::DimensionMismatch`].
//!
//! # Example
//!
//! ```rust,ignore
//! use sage::db::{InMemoryVectorStore, VectorStore};
//!
//! let store = InMemoryVectorStore::new(384);
//! store.upsert("default", &records).await?;
//! let matches = store.query("default", &query_embedding, 2).await?;
//! ```

use crate::types::{AppError, Result, RetrievalMatch, VectorRecord};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Abstract trait for vector index operations.
///
/// Query results are ranked by descending cosine similarity; ties are broken
/// by ascending id so identical inputs always produce identical output.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of this backend, for logs and health reporting.
    fn provider_name(&self) -> &'static str;

    /// Dimensionality every vector in this store must have.
    fn dimensions(&self) -> usize;

    /// Insert or overwrite records in a namespace.
    ///
    /// Idempotent: re-upserting an id replaces its previous values.
    /// Returns the number of records written.
    async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<usize>;

    /// Return the `top_k` most similar records in a namespace.
    ///
    /// An empty or unknown namespace yields an empty result, not an error.
    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievalMatch>>;

    /// Number of vectors stored in a namespace.
    async fn count(&self, namespace: &str) -> Result<usize>;
}

/// Embedded vector store backed by a brute-force cosine scan.
///
/// Exact rather than approximate search: for corpora in the thousands of
/// documents the scan is faster than maintaining an ANN index, and results
/// are fully deterministic.
pub struct InMemoryVectorStore {
    dimensions: usize,
    namespaces: RwLock<HashMap<String, HashMap<String, VectorRecord>>>,
}

impl InMemoryVectorStore {
    /// Create a store for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            namespaces: RwLock::new(HashMap::new()),
        }
    }

    fn check_dimensions(&self, actual: usize) -> Result<()> {
        if actual != self.dimensions {
            return Err(AppError::DimensionMismatch {
                expected: self.dimensions,
                actual,
            });
        }
        Ok(())
    }

    /// Cosine similarity in `[-1, 1]`; zero-norm vectors score 0.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn upsert(&self, namespace: &str, records: &[VectorRecord]) -> Result<usize> {
        for record in records {
            self.check_dimensions(record.values.len())?;
        }

        let mut namespaces = self.namespaces.write();
        let entries = namespaces.entry(namespace.to_string()).or_default();
        for record in records {
            entries.insert(record.id.clone(), record.clone());
        }

        Ok(records.len())
    }

    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievalMatch>> {
        if top_k == 0 {
            return Err(AppError::InvalidInput("top_k must be positive".to_string()));
        }
        self.check_dimensions(vector.len())?;

        let namespaces = self.namespaces.read();
        let Some(entries) = namespaces.get(namespace) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<RetrievalMatch> = entries
            .values()
            .map(|record| RetrievalMatch {
                id: record.id.clone(),
                score: Self::cosine_similarity(vector, &record.values),
                metadata: record.metadata.clone(),
            })
            .collect();

        // Descending score, ascending id on ties, so ranking is stable.
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        matches.truncate(top_k);

        Ok(matches)
    }

    async fn count(&self, namespace: &str) -> Result<usize> {
        let namespaces = self.namespaces.read();
        Ok(namespaces.get(namespace).map_or(0, HashMap::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VectorMetadata;

    fn record(id: &str, values: Vec<f32>) -> VectorRecord {
        VectorRecord {
            id: id.to_string(),
            values,
            metadata: VectorMetadata {
                title: format!("Doc {}", id),
            },
        }
    }

    #[tokio::test]
    async fn query_ranks_by_descending_similarity() {
        let store = InMemoryVectorStore::new(3);
        store
            .upsert(
                "default",
                &[
                    record("vec_0", vec![1.0, 0.0, 0.0]),
                    record("vec_1", vec![0.0, 1.0, 0.0]),
                    record("vec_2", vec![0.9, 0.1, 0.0]),
                ],
            )
            .await
            .unwrap();

        let matches = store
            .query("default", &[1.0, 0.0, 0.0], 2)
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "vec_0");
        assert_eq!(matches[1].id, "vec_2");
        assert!(matches[0].score > matches[1].score);
    }

    #[tokio::test]
    async fn ties_break_by_ascending_id() {
        let store = InMemoryVectorStore::new(2);
        // Identical vectors, so both score 1.0 against the query.
        store
            .upsert(
                "default",
                &[
                    record("vec_b", vec![1.0, 0.0]),
                    record("vec_a", vec![1.0, 0.0]),
                ],
            )
            .await
            .unwrap();

        let matches = store.query("default", &[1.0, 0.0], 2).await.unwrap();

        assert_eq!(matches[0].id, "vec_a");
        assert_eq!(matches[1].id, "vec_b");
    }

    #[tokio::test]
    async fn query_is_deterministic() {
        let store = InMemoryVectorStore::new(2);
        store
            .upsert(
                "default",
                &[
                    record("vec_0", vec![0.6, 0.8]),
                    record("vec_1", vec![0.8, 0.6]),
                    record("vec_2", vec![0.0, 1.0]),
                ],
            )
            .await
            .unwrap();

        let first = store.query("default", &[1.0, 0.0], 3).await.unwrap();
        let second = store.query("default", &[1.0, 0.0], 3).await.unwrap();

        let ids = |m: &[RetrievalMatch]| m.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn empty_namespace_returns_empty() {
        let store = InMemoryVectorStore::new(3);
        let matches = store.query("default", &[1.0, 0.0, 0.0], 2).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = InMemoryVectorStore::new(2);
        store
            .upsert("alpha", &[record("vec_0", vec![1.0, 0.0])])
            .await
            .unwrap();
        store
            .upsert("beta", &[record("vec_1", vec![1.0, 0.0])])
            .await
            .unwrap();

        let matches = store.query("alpha", &[1.0, 0.0], 10).await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "vec_0");
        assert_eq!(store.count("beta").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_id() {
        let store = InMemoryVectorStore::new(2);
        store
            .upsert("default", &[record("vec_0", vec![1.0, 0.0])])
            .await
            .unwrap();
        store
            .upsert("default", &[record("vec_0", vec![0.0, 1.0])])
            .await
            .unwrap();

        assert_eq!(store.count("default").await.unwrap(), 1);

        let matches = store.query("default", &[0.0, 1.0], 1).await.unwrap();
        assert!((matches[0].score - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn dimension_mismatch_rejected() {
        let store = InMemoryVectorStore::new(3);

        let upsert = store
            .upsert("default", &[record("vec_0", vec![1.0, 0.0])])
            .await;
        assert!(matches!(
            upsert,
            Err(AppError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));

        let query = store.query("default", &[1.0, 0.0], 2).await;
        assert!(matches!(query, Err(AppError::DimensionMismatch { .. })));
    }

    #[tokio::test]
    async fn zero_top_k_rejected() {
        let store = InMemoryVectorStore::new(2);
        let result = store.query("default", &[1.0, 0.0], 0).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn cosine_similarity_range() {
        let identical = InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
        assert!((identical - 1.0).abs() < 0.001);

        let orthogonal = InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(orthogonal.abs() < 0.001);

        let opposite = InMemoryVectorStore::cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((opposite + 1.0).abs() < 0.001);

        let zero = InMemoryVectorStore::cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]);
        assert_eq!(zero, 0.0);
    }
}
