//! kb-assistant: local knowledge assistant with keyword-grounded answers
//!
//! Documents are uploaded into a local knowledge base, split into
//! overlapping chunks, and retrieved by keyword score when a question
//! arrives. The retrieved excerpts ground a prompt sent to a remote
//! Gemini endpoint; the response is normalized into a single answer
//! contract and appended to the persisted chat history.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AssistantConfig;
pub use error::{Error, Result};
pub use types::{
    chat::{ChatRequest, ChatResponse, ContextChunk},
    knowledge::{ChatMessage, KnowledgeChunk, Role, ScoredChunk},
};
