//! Chat history endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::knowledge::ChatMessage;

/// GET /api/history - Chat history ordered oldest first
pub async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<ChatMessage>>> {
    let messages = state.store().list_messages().await?;
    Ok(Json(messages))
}

/// DELETE /api/history - Clear chat history
pub async fn clear_history(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    state.store().clear_messages().await?;
    tracing::info!("Chat history cleared");
    Ok(Json(serde_json::json!({ "cleared": true })))
}
