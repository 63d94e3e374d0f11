//! API routes for the assistant server

pub mod chat;
pub mod history;
pub mod ingest;
pub mod knowledge;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Chat
        .route("/chat", post(chat::chat))
        // Ingestion - with a larger body limit for file uploads
        .route(
            "/ingest",
            post(ingest::ingest_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Knowledge base management
        .route("/knowledge", get(knowledge::list_files))
        .route("/knowledge", delete(knowledge::clear_knowledge))
        .route("/knowledge/:file_name", delete(knowledge::delete_file))
        // Chat history
        .route("/history", get(history::list_history))
        .route("/history", delete(history::clear_history))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "kb-assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Local knowledge assistant with keyword-grounded answers",
        "endpoints": {
            "POST /api/chat": "Ask a question, optionally with pre-retrieved context",
            "POST /api/ingest": "Upload knowledge files (multipart)",
            "GET /api/knowledge": "List knowledge files",
            "DELETE /api/knowledge": "Clear the knowledge base",
            "DELETE /api/knowledge/:file_name": "Delete one file's chunks",
            "GET /api/history": "Chat history, oldest first",
            "DELETE /api/history": "Clear chat history"
        }
    }))
}

