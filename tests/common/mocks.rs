//! Stub collaborators for pipeline and API tests.
//!
//! Hand-rolled rather than generated: each stub counts its calls so tests
//! can assert that validation failures happen before any collaborator is
//! touched.

use async_trait::async_trait;
use parking_lot::Mutex;
use sage::rag::embeddings::EmbeddingProvider;
use sage::types::{AppError, Result};
use sage::CompletionClient;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Embedding stub returning canned vectors per input text.
pub struct StubEmbeddings {
    dimensions: usize,
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    calls: AtomicUsize,
}

impl StubEmbeddings {
    /// A stub producing zero vectors of the given dimension by default.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: HashMap::new(),
            fallback: vec![0.0; dimensions],
            calls: AtomicUsize::new(0),
        }
    }

    /// Register the vector returned for an exact input text.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// Vector returned for texts without a registered mapping.
    pub fn with_fallback(mut self, vector: Vec<f32>) -> Self {
        self.fallback = vector;
        self
    }

    /// How many times `embed` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "stub-embeddings"
    }
}

enum CompletionBehavior {
    Fixed(String),
    EchoTail(usize),
    FailTransport,
    FailStatus(u16),
    FailMalformed,
}

/// Completion stub with configurable behavior and prompt capture.
pub struct StubCompletion {
    behavior: CompletionBehavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubCompletion {
    /// Always answer with the same text.
    pub fn fixed(response: &str) -> Self {
        Self::with_behavior(CompletionBehavior::Fixed(response.to_string()))
    }

    /// Echo the last `n` characters of the prompt.
    pub fn echo_tail(n: usize) -> Self {
        Self::with_behavior(CompletionBehavior::EchoTail(n))
    }

    /// Fail every call with a transport error.
    pub fn failing_transport() -> Self {
        Self::with_behavior(CompletionBehavior::FailTransport)
    }

    /// Fail every call with the given HTTP status.
    pub fn failing_status(status: u16) -> Self {
        Self::with_behavior(CompletionBehavior::FailStatus(status))
    }

    /// Fail every call with a malformed-response error.
    pub fn failing_malformed() -> Self {
        Self::with_behavior(CompletionBehavior::FailMalformed)
    }

    fn with_behavior(behavior: CompletionBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// How many times `complete` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent prompt received, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());

        match &self.behavior {
            CompletionBehavior::Fixed(response) => Ok(response.clone()),
            CompletionBehavior::EchoTail(n) => {
                let chars: Vec<char> = prompt.chars().collect();
                let start = chars.len().saturating_sub(*n);
                Ok(chars[start..].iter().collect())
            }
            CompletionBehavior::FailTransport => {
                Err(AppError::Transport("connection refused".to_string()))
            }
            CompletionBehavior::FailStatus(status) => Err(AppError::HttpStatus {
                status: *status,
                message: "upstream rejected the request".to_string(),
            }),
            CompletionBehavior::FailMalformed => Err(AppError::MalformedResponse(
                "body carried no assistant message".to_string(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "stub-completion"
    }
}
