use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(crate::api::handlers::chat::chat))
        .route("/health", get(crate::api::handlers::health::health))
}
