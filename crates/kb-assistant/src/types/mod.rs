//! Domain and wire types

pub mod chat;
pub mod ingest;
pub mod knowledge;

pub use chat::{ChatRequest, ChatResponse, ContextChunk};
pub use ingest::{IngestError, IngestResponse, IngestedFile};
pub use knowledge::{ChatMessage, KnowledgeChunk, KnowledgeFile, Role, ScoredChunk};
