use crate::{
    types::{ChatRequest, ChatResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use uuid::Uuid;

/// Chat with the assistant
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat response", body = ChatResponse),
        (status = 400, description = "Invalid input"),
        (status = 502, description = "Upstream service failure")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let session_id = payload
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let memory = state.sessions.get_or_create(&session_id);
    let mut memory = memory.lock().await;

    let response = state.pipeline.answer(&payload.message, &mut memory).await?;

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}
