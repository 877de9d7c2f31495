//! The per-turn RAG orchestration.
//!
//! [`RagPipeline`] coordinates the collaborators for one conversational
//! turn: embed the query, retrieve the nearest documents, fuse them with
//! conversation memory into a prompt, call the completion service, and
//! record the turn in memory.
//!
//! The pipeline itself is stateless and reentrant; the only mutable state
//! is the [`ConversationMemory`] handed in by the caller, so concurrent
//! sessions stay isolated as long as each owns its memory.

use crate::db::{DocumentStore, VectorStore};
use crate::llm::CompletionClient;
use crate::memory::{format_memory_for_prompt, ConversationLine, ConversationMemory};
use crate::rag::embeddings::EmbeddingProvider;
use crate::types::{AppError, Document, Result};
use crate::utils::config::DEFAULT_SYSTEM_PROMPT;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Tunables for the retrieval pipeline.
#[derive(Debug, Clone)]
pub struct RagOptions {
    /// System instruction placed at the head of every prompt.
    pub system_prompt: String,
    /// Vector index namespace to query.
    pub namespace: String,
    /// Number of documents retrieved per query.
    ///
    /// Defaults to 2: few, highly relevant snippets beat many noisy ones
    /// for short-context prompts.
    pub top_k: usize,
}

impl Default for RagOptions {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            namespace: "default".to_string(),
            top_k: 2,
        }
    }
}

/// Coordinates one conversational turn across the collaborators.
pub struct RagPipeline {
    embeddings: Arc<dyn EmbeddingProvider>,
    vectors: Arc<dyn VectorStore>,
    documents: Arc<DocumentStore>,
    completion: Arc<dyn CompletionClient>,
    options: RagOptions,
}

impl RagPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        vectors: Arc<dyn VectorStore>,
        documents: Arc<DocumentStore>,
        completion: Arc<dyn CompletionClient>,
        options: RagOptions,
    ) -> Self {
        Self {
            embeddings,
            vectors,
            documents,
            completion,
            options,
        }
    }

    /// Answer one user query, recording the turn in `memory`.
    ///
    /// Completion failures (`Transport`, `HttpStatus`, `MalformedResponse`)
    /// degrade into the returned answer text rather than failing the turn;
    /// the degraded message is remembered like any answer so the model can
    /// acknowledge it next turn. Memory is only mutated once the completion
    /// call has resolved, so an interrupted call leaves no partial state.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidInput`] for an empty or whitespace-only query,
    /// before any collaborator is called. Embedding and index errors
    /// (notably [`AppError::DimensionMismatch`]) propagate: they are
    /// configuration-level, not conversational.
    pub async fn answer(&self, query: &str, memory: &mut ConversationMemory) -> Result<String> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }

        let vector = self.embeddings.embed(query).await?;
        let matches = self
            .vectors
            .query(&self.options.namespace, &vector, self.options.top_k)
            .await?;
        debug!(matches = matches.len(), top_k = self.options.top_k, "retrieved nearest documents");

        let mut context_docs: Vec<Document> = Vec::with_capacity(matches.len());
        for retrieved in &matches {
            match self.documents.get(&retrieved.id) {
                Ok(doc) => context_docs.push(doc),
                Err(AppError::NotFound(_)) => {
                    // Reduced-context degradation, not fatal: the index knows
                    // an id the local store never ingested.
                    warn!(
                        document_id = %retrieved.id,
                        score = retrieved.score,
                        "retrieval hit has no local document, skipping"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        let context = context_docs
            .iter()
            .map(|doc| doc.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let memory_text = format_memory_for_prompt(&memory.snapshot());
        let prompt = compose_prompt(&self.options.system_prompt, query, &context, &memory_text);

        let answer = match self.completion.complete(&prompt).await {
            Ok(text) => text,
            Err(e) if e.is_degradable() => {
                error!(error = %e, "completion call failed, returning degraded answer");
                e.to_string()
            }
            Err(e) => return Err(e),
        };

        memory.append(ConversationLine::user(query));
        memory.append(ConversationLine::assistant(answer.clone()));

        Ok(answer)
    }

    /// The document store backing this pipeline.
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }
}

/// Compose the prompt in its fixed order: system instruction, user query,
/// retrieved context, memory, and the `AI:` sentinel the model continues
/// from.
fn compose_prompt(system_prompt: &str, query: &str, context: &str, memory: &str) -> String {
    format!(
        "{}\nUser: {}\nContext:\n{}\nMemory:\n{}\nAI:",
        system_prompt, query, context, memory
    )
}
