use crate::{types::HealthResponse, AppState};
use axum::{extract::State, Json};

/// Service health and corpus status
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        documents: state.pipeline.documents().len(),
        sessions: state.sessions.len(),
    })
}
