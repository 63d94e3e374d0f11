//! Ingestion endpoint wire types

use serde::{Deserialize, Serialize};

/// Response from an upload batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    /// True when at least one file produced chunks
    pub success: bool,
    /// Successfully ingested files
    pub files: Vec<IngestedFile>,
    /// Total chunks created across the batch
    pub total_chunks_created: usize,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
    /// Per-file failures; one unreadable file never aborts the batch
    pub errors: Vec<IngestError>,
}

/// Summary of one ingested file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestedFile {
    pub file_name: String,
    pub chunks_created: usize,
}

/// A per-file ingestion failure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestError {
    pub file_name: String,
    pub error: String,
}
