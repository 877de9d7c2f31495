//! HTTP API: routes, handlers, and the session registry.

/// Request handlers.
pub mod handlers;
/// Router assembly.
pub mod routes;
/// Per-session conversation memory registry.
pub mod sessions;

pub use routes::create_router;
pub use sessions::SessionRegistry;

use crate::types::{ChatRequest, ChatResponse, HealthResponse};
use utoipa::OpenApi;

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::chat::chat, handlers::health::health),
    components(schemas(ChatRequest, ChatResponse, HealthResponse)),
    info(
        title = "S.A.G.E",
        description = "Security Advisory Generation Engine - retrieval-augmented cybersecurity assistant"
    )
)]
pub struct ApiDoc;
