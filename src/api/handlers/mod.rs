//! Request handlers.

/// The `/chat` endpoint.
pub mod chat;
/// The `/health` endpoint.
pub mod health;
