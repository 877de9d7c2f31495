//! Completion client abstraction and provider selection.

use crate::types::Result;
use async_trait::async_trait;

/// Generic completion client trait.
///
/// Implementations take a fully assembled prompt and return the generated
/// text. The call is synchronous from the pipeline's point of view: no
/// streaming, no retries, and the implementation owns its own timeout
/// behavior.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion for an assembled prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// The model identifier requests are issued against.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
///
/// A single variant today; the enum keeps the construction seam open so a
/// second backend slots in without touching call sites.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenRouter, or any OpenAI-compatible chat-completions endpoint.
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenRouter {
    ///     api_key: "sk-or-...".to_string(),
    ///     api_base: "https://openrouter.ai/api/v1".to_string(),
    ///     model: "anthropic/claude-3.5-haiku".to_string(),
    /// };
    /// ```
    OpenRouter {
        /// Bearer token for the endpoint.
        api_key: String,
        /// Base URL up to and excluding `/chat/completions`.
        api_base: String,
        /// Model identifier in the provider's naming scheme.
        model: String,
    },
}

impl Provider {
    /// Create a client instance for this provider.
    pub fn create_client(&self) -> Box<dyn CompletionClient> {
        match self {
            Provider::OpenRouter {
                api_key,
                api_base,
                model,
            } => Box::new(super::openrouter::OpenRouterClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            )),
        }
    }

    /// Human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenRouter { .. } => "OpenRouter",
        }
    }
}
