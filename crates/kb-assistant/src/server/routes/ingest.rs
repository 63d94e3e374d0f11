//! Knowledge file ingestion endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::{IngestPipeline, UploadedFile};
use crate::server::state::AppState;
use crate::types::ingest::{IngestError, IngestResponse, IngestedFile};

/// POST /api/ingest - Upload and process files
///
/// Files are processed strictly sequentially: one file's
/// extract-chunk-persist cycle completes before the next begins. Per-file
/// failures land in the `errors` array and never abort the batch.
pub async fn ingest_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();
    let config = state.config();
    let pipeline = IngestPipeline::new(
        config.chunking.chunk_size,
        config.chunking.chunk_overlap,
    );

    let mut files = Vec::new();
    let mut errors = Vec::new();
    let mut total_chunks = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("file_{}.bin", Uuid::new_v4()));
        let media_type = field.content_type().map(|s| s.to_string());

        let data = match field.bytes().await {
            Ok(d) => d.to_vec(),
            Err(e) => {
                errors.push(IngestError {
                    file_name,
                    error: format!("Failed to read file: {}", e),
                });
                continue;
            }
        };

        tracing::info!("Processing file: {} ({} bytes)", file_name, data.len());

        let upload = UploadedFile {
            name: file_name.clone(),
            media_type,
            data,
        };

        // Extraction and chunking are total; only storage can fail here.
        let chunks = pipeline.ingest(&upload);

        match persist_chunks(&state, &chunks).await {
            Ok(()) => {
                total_chunks += chunks.len();
                files.push(IngestedFile {
                    file_name: file_name.clone(),
                    chunks_created: chunks.len(),
                });
                tracing::info!("Ingested {}: {} chunk(s)", file_name, chunks.len());
            }
            Err(e) => {
                tracing::error!("Failed to persist {}: {}", file_name, e);
                errors.push(IngestError {
                    file_name,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(Json(IngestResponse {
        success: !files.is_empty(),
        files,
        total_chunks_created: total_chunks,
        processing_time_ms: start.elapsed().as_millis() as u64,
        errors,
    }))
}

async fn persist_chunks(
    state: &AppState,
    chunks: &[crate::types::knowledge::KnowledgeChunk],
) -> Result<()> {
    for chunk in chunks {
        state.store().add_chunk(chunk).await?;
    }
    Ok(())
}
