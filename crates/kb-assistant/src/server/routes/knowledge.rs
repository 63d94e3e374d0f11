//! Knowledge base management endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::knowledge::KnowledgeFile;

/// GET /api/knowledge - List knowledge files with chunk counts
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<KnowledgeFile>>> {
    let files = state.store().list_files().await?;
    Ok(Json(files))
}

/// DELETE /api/knowledge/:file_name - Delete all chunks of one file
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.store().delete_chunks_by_file(&file_name).await?;
    tracing::info!("Deleted {} chunk(s) of {}", deleted, file_name);
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// DELETE /api/knowledge - Clear the whole knowledge base
pub async fn clear_knowledge(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    state.store().clear_chunks().await?;
    tracing::info!("Knowledge base cleared");
    Ok(Json(serde_json::json!({ "cleared": true })))
}
