//! Chat endpoint wire types

use serde::{Deserialize, Serialize};

/// Request accepted by the chat endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user question
    #[serde(default)]
    pub message: String,
    /// Pre-retrieved context chunks. When omitted the server retrieves
    /// context from the knowledge store itself.
    #[serde(default)]
    pub context: Option<Vec<ContextChunk>>,
}

/// A grounding excerpt supplied with (or retrieved for) a question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextChunk {
    pub file_name: String,
    pub content: String,
}

/// Successful chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The generated answer
    pub message: String,
    /// File names of the context chunks, order-preserving, duplicates as
    /// encountered
    pub sources: Vec<String>,
}
