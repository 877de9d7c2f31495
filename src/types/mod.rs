use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Body of a `POST /chat` request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The user's message for this turn.
    pub message: String,
    /// Conversation session to continue. A new session is created when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Body of a `POST /chat` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// The assistant's answer for this turn.
    pub response: String,
    /// Session the turn was recorded under; pass it back to continue.
    pub session_id: String,
}

/// Body of a `GET /health` response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is able to answer.
    pub status: String,
    /// Number of documents available for retrieval.
    pub documents: usize,
    /// Number of live conversation sessions.
    pub sessions: usize,
}

// ============= Retrieval Types =============

/// A reference document, ingested once and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, unique for the lifetime of the index.
    pub id: String,
    /// Human-readable title from the ingestion source.
    pub title: String,
    /// Full document text used for prompt context.
    pub content: String,
}

/// Metadata stored alongside a vector in the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorMetadata {
    /// Document title carried through the index for observability.
    pub title: String,
}

/// The upsert shape accepted by a [`crate::db::VectorStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Document identifier this vector belongs to.
    pub id: String,
    /// The embedding itself; length must match the store's dimensionality.
    pub values: Vec<f32>,
    /// Metadata returned with query matches.
    pub metadata: VectorMetadata,
}

/// A single ranked result from a vector index query.
///
/// Ephemeral: produced per query, never persisted.
#[derive(Debug, Clone)]
pub struct RetrievalMatch {
    /// Identifier of the matched document.
    pub id: String,
    /// Cosine similarity to the query vector, in `[-1, 1]`.
    pub score: f32,
    /// Metadata stored with the vector at upsert time.
    pub metadata: VectorMetadata,
}

// ============= Error Types =============

/// Application-wide error taxonomy.
///
/// The completion-side variants (`Transport`, `HttpStatus`,
/// `MalformedResponse`) are recoverable at the turn level: the pipeline
/// converts them into a degraded answer instead of failing the turn.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad caller input, rejected before any external call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Vector dimensionality does not match the index configuration.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality the index was created with.
        expected: usize,
        /// Dimensionality actually provided.
        actual: usize,
    },

    /// Network or connection failure reaching an external service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// External service answered with a non-2xx status.
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        /// The status code returned by the service.
        status: u16,
        /// Response body excerpt for diagnostics.
        message: String,
    },

    /// External service answered 2xx but the body is missing the answer field.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Startup or environment configuration problem.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures the pipeline absorbs into a degraded answer
    /// rather than failing the turn.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::HttpStatus { .. } | AppError::MalformedResponse(_)
        )
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Transport(_)
            | AppError::HttpStatus { .. }
            | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::DimensionMismatch { .. }
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
