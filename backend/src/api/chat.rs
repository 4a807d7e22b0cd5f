//! Chat API
//!
//! `POST /api/chat` relays one message and returns the reply together with the
//! conversation id, the emotion state and the rendered face.

use anyhow::anyhow;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::api::utils::validate_message;
use crate::chat::ChatReply;
use crate::error::AppError;
use crate::state::AppState;

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Conversation to continue; absent, null or unknown starts a new one
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Relay a chat message
pub async fn chat(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = request?;
    validate_message(&request.message)?;

    tracing::debug!(
        conversation_id = ?request.conversation_id,
        message_len = request.message.len(),
        "Chat request received"
    );

    // a panic inside the turn surfaces as a 500 instead of a dropped connection
    let relay = state.relay.clone();
    let reply = tokio::spawn(async move {
        relay
            .handle(&request.message, request.conversation_id.as_deref())
            .await
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("Chat turn aborted: {}", e)))?;

    Ok(Json(reply))
}
