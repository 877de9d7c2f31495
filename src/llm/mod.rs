//! Completion service clients.
//!
//! The pipeline talks to the completion side through the [`CompletionClient`]
//! trait: one prompt in, one answer out, no streaming. The shipped backend
//! targets OpenRouter (or any OpenAI-compatible chat-completions endpoint).
//!
//! Failures follow a three-way taxonomy the pipeline relies on:
//! `Transport` for connection-level problems, `HttpStatus` for non-2xx
//! answers, `MalformedResponse` for a 2xx body without the answer field.

/// Core completion trait and provider selection.
pub mod client;
/// OpenRouter / OpenAI-compatible chat-completions client.
pub mod openrouter;

pub use client::{CompletionClient, Provider};
pub use openrouter::OpenRouterClient;
