//! Knowledge base and chat history records

use serde::{Deserialize, Serialize};

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A chunk of ingested document text, the unit of storage and retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeChunk {
    /// Unique chunk ID, derived from file name, ingestion timestamp and
    /// sequence index
    pub id: String,
    /// Source file name
    pub file_name: String,
    /// Chunk text, non-empty after trimming
    pub content: String,
    /// Ingestion timestamp (epoch milliseconds), shared by all chunks of
    /// one ingestion
    pub timestamp: i64,
}

impl KnowledgeChunk {
    /// Create a chunk for the given ingestion batch
    pub fn new(file_name: &str, content: String, timestamp: i64, index: usize) -> Self {
        Self {
            id: format!("{}-{}-{}", file_name, timestamp, index),
            file_name: file_name.to_string(),
            content,
            timestamp,
        }
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// A persisted chat message, append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message ID, role-prefixed with the creation timestamp
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Creation timestamp (epoch milliseconds); history is ordered by this
    pub timestamp: i64,
}

impl ChatMessage {
    /// Create a message stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let timestamp = now_millis();
        Self {
            id: format!("{}-{}", role.as_str(), timestamp),
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A chunk paired with its relevance score, transient and retrieval-only
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: KnowledgeChunk,
    pub score: usize,
}

/// Per-file summary of the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeFile {
    pub file_name: String,
    pub chunk_count: usize,
    /// Most recent ingestion timestamp for this file (epoch milliseconds)
    pub last_ingested: i64,
}
