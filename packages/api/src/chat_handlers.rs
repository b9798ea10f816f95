// ABOUTME: HTTP request handler for the proposal assistant chat
// ABOUTME: Single-turn and stateless, each message is answered independently

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::CurrentUser;
use super::error::ApiResult;
use super::response::ok;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!("Chat request from user: {}", user.0.id);

    let response = state.chat.reply(&request.message).await?;

    Ok(ok(ChatResponse { response }))
}
