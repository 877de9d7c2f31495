use crate::types::{AppError, Result};
use std::env;

/// Default system instruction for the assembled prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a cybersecurity expert. Help users by providing cybersecurity best practices.";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Completion provider settings.
    pub llm: LlmConfig,
    /// Embedding provider settings.
    pub embeddings: EmbeddingsConfig,
    /// Retrieval pipeline settings.
    pub rag: RagSettings,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `127.0.0.1`.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

/// Completion provider settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token for the completion endpoint.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub api_base: String,
    /// Model identifier to request.
    pub model: String,
}

/// Embedding provider settings.
#[derive(Debug, Clone)]
pub struct EmbeddingsConfig {
    /// Optional bearer token for the embeddings endpoint.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible embeddings endpoint.
    pub api_base: String,
    /// Embedding model identifier.
    pub model: String,
    /// Dimensionality the vector index is created with.
    pub dimensions: usize,
}

/// Retrieval pipeline settings.
#[derive(Debug, Clone)]
pub struct RagSettings {
    /// Vector index namespace holding the corpus.
    pub namespace: String,
    /// Number of documents retrieved per query.
    pub top_k: usize,
    /// Conversation memory capacity in lines.
    pub memory_capacity: usize,
    /// System instruction placed at the head of every prompt.
    pub system_prompt: String,
    /// Path to the CSV corpus ingested at startup.
    pub corpus_path: String,
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// Only `OPENROUTER_API_KEY` is required; everything else has defaults
    /// matching the reference deployment: top-2 retrieval, 3-line memory,
    /// 384-dimensional embeddings, `default` namespace.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 5000)?,
            },
            llm: LlmConfig {
                api_key: env::var("OPENROUTER_API_KEY").map_err(|_| {
                    AppError::Configuration("OPENROUTER_API_KEY must be set".to_string())
                })?,
                api_base: env::var("OPENROUTER_API_BASE")
                    .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
                model: env::var("COMPLETION_MODEL")
                    .unwrap_or_else(|_| "anthropic/claude-3.5-haiku".to_string()),
            },
            embeddings: EmbeddingsConfig {
                api_key: env::var("EMBEDDINGS_API_KEY").ok(),
                api_base: env::var("EMBEDDINGS_API_BASE")
                    .unwrap_or_else(|_| "http://localhost:8080/v1".to_string()),
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
                dimensions: parse_var("EMBEDDING_DIMENSIONS", 384)?,
            },
            rag: RagSettings {
                namespace: env::var("INDEX_NAMESPACE").unwrap_or_else(|_| "default".to_string()),
                top_k: parse_var("RETRIEVAL_TOP_K", 2)?,
                memory_capacity: parse_var("MEMORY_CAPACITY", 3)?,
                system_prompt: env::var("SYSTEM_PROMPT")
                    .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string()),
                corpus_path: env::var("CORPUS_PATH")
                    .unwrap_or_else(|_| "data/cybersecurity_guides.csv".to_string()),
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            AppError::Configuration(format!("{} has an invalid value: '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
