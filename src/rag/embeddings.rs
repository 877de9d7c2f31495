//! Embedding providers: text in, fixed-length vector out.
//!
//! The default backend talks to an OpenAI-compatible `/embeddings` endpoint.
//! With the `local-embeddings` feature enabled, a fastembed-based ONNX
//! provider runs the model in-process instead.

use crate::types::{AppError, Result};
use crate::utils::excerpt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Turns text into a fixed-dimension embedding vector.
///
/// Implementations must be deterministic for a fixed model: the same text
/// always embeds to the same vector. Empty input returns an all-zero vector
/// of the configured dimension without invoking the backing model.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimensionality of every vector this provider produces.
    fn dimensions(&self) -> usize;

    /// The embedding model identifier.
    fn model_name(&self) -> &str;
}

// ============================================================================
// HTTP provider (OpenAI-compatible /embeddings)
// ============================================================================

/// Embeddings via an OpenAI-compatible HTTP endpoint.
pub struct HttpEmbeddings {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    data: Vec<EmbeddingObject>,
}

#[derive(Deserialize)]
struct EmbeddingObject {
    embedding: Vec<f32>,
}

impl HttpEmbeddings {
    /// Create a provider for the given endpoint, model, and dimensionality.
    pub fn new(
        api_key: Option<String>,
        api_base: String,
        model: String,
        dimensions: usize,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            api_base,
            model,
            dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.dimensions]);
        }

        let url = format!("{}/embeddings", self.api_base.trim_end_matches('/'));
        let payload = EmbeddingsRequest {
            model: &self.model,
            input: vec![text],
        };

        let mut request = self.http.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("embeddings request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("failed to read embeddings body: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                message: excerpt(&body, 200),
            });
        }

        let parsed: EmbeddingsResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::MalformedResponse(format!("invalid embeddings JSON: {}", e)))?;

        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| {
                AppError::MalformedResponse("embeddings body carried no data".to_string())
            })?;

        if vector.len() != self.dimensions {
            return Err(AppError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Local provider (fastembed, optional)
// ============================================================================

/// In-process ONNX embeddings via fastembed (BGE-small, 384 dimensions).
#[cfg(feature = "local-embeddings")]
pub struct FastembedEmbeddings {
    // fastembed's embed takes &mut self; the mutex makes the provider Sync.
    model: parking_lot::Mutex<fastembed::TextEmbedding>,
    dimensions: usize,
}

#[cfg(feature = "local-embeddings")]
impl FastembedEmbeddings {
    /// Load the model, downloading it on first use.
    pub fn new() -> Result<Self> {
        use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::BGESmallENV15).with_show_download_progress(true),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            model: parking_lot::Mutex::new(model),
            dimensions: 384,
        })
    }
}

#[cfg(feature = "local-embeddings")]
#[async_trait]
impl EmbeddingProvider for FastembedEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.dimensions]);
        }

        let mut model = self.model.lock();
        let mut vectors = model
            .embed(vec![text], None)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        vectors
            .pop()
            .ok_or_else(|| AppError::Internal("fastembed returned no vector".to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "BAAI/bge-small-en-v1.5"
    }
}
