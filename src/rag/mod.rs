//! Retrieval Augmented Generation (RAG) pipeline.
//!
//! This module holds the conversational core: turning a query into an
//! embedding, retrieving the nearest reference documents, fusing them with
//! recent conversation memory into a single prompt, and calling the
//! completion service.
//!
//! # Module Structure
//!
//! - [`embeddings`](crate::rag::embeddings) - text → fixed-length vector providers
//! - [`pipeline`](crate::rag::pipeline) - the per-turn orchestration
//! - [`ingest`](crate::rag::ingest) - CSV corpus → vector index + document store
//!
//! # Data flow per turn
//!
//! query → embedding → nearest-document ids → document texts → prompt
//! (system instruction + query + retrieved context + memory + `AI:` sentinel)
//! → completion → answer → memory update.

/// Embedding providers.
pub mod embeddings;
/// Startup corpus ingestion.
pub mod ingest;
/// The per-turn RAG orchestration.
pub mod pipeline;

pub use embeddings::EmbeddingProvider;
pub use pipeline::{RagOptions, RagPipeline};
