//! # S.A.G.E - Security Advisory Generation Engine
//!
//! A retrieval-augmented cybersecurity assistant: user queries are embedded,
//! matched against a vector index of reference documents, fused with recent
//! conversation memory into a single prompt, and answered by an LLM
//! completion call.
//!
//! ## Overview
//!
//! S.A.G.E can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `sage-server` binary
//! 2. **As a library** - Wire [`RagPipeline`] into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use sage::{
//!     db::{DocumentStore, InMemoryVectorStore},
//!     llm::Provider,
//!     memory::ConversationMemory,
//!     rag::{ingest, RagOptions, RagPipeline},
//! };
//! use std::sync::Arc;
//!
//! let vectors = Arc::new(InMemoryVectorStore::new(384));
//! let documents = Arc::new(DocumentStore::new());
//! // ... ingest a corpus, pick an embedding provider ...
//!
//! let completion = Provider::OpenRouter {
//!     api_key: "sk-or-...".into(),
//!     api_base: "https://openrouter.ai/api/v1".into(),
//!     model: "anthropic/claude-3.5-haiku".into(),
//! }
//! .create_client();
//!
//! let pipeline = RagPipeline::new(
//!     embeddings,
//!     vectors,
//!     documents,
//!     completion.into(),
//!     RagOptions::default(),
//! );
//!
//! let mut memory = ConversationMemory::default();
//! let answer = pipeline.answer("how do I secure my account?", &mut memory).await?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-embeddings` | In-process ONNX embeddings via fastembed |
//!
//! ## Modules
//!
//! - [`api`] - HTTP routes, handlers, and the session registry
//! - [`db`] - Vector index and document store
//! - [`llm`] - Completion service clients
//! - [`memory`] - Bounded conversation memory
//! - [`rag`] - The retrieval-augmented generation pipeline
//! - [`types`] - Common types and error handling
//!
//! ## Architecture
//!
//! Per-turn data flow:
//!
//! ```text
//! query ──> embedding ──> vector index ──> document store
//!                                              │
//!            conversation memory ──────────────┤
//!                                              ▼
//!                                      prompt assembly ──> completion ──> answer
//!                                                                           │
//!            conversation memory <── user line + assistant line ────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers, routes, and session registry.
pub mod api;
/// Vector index and document storage.
pub mod db;
/// Completion service clients.
pub mod llm;
/// Bounded conversation memory.
pub mod memory;
/// Retrieval Augmented Generation (RAG) pipeline.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use api::SessionRegistry;
pub use db::{DocumentStore, InMemoryVectorStore, VectorStore};
pub use llm::{CompletionClient, Provider};
pub use memory::{ConversationLine, ConversationMemory, Speaker};
pub use rag::{EmbeddingProvider, RagOptions, RagPipeline};
pub use types::{AppError, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The retrieval pipeline answering each turn.
    pub pipeline: Arc<RagPipeline>,
    /// Per-session conversation memories.
    pub sessions: Arc<SessionRegistry>,
}
