//! Document ingestion: extraction, chunking, and chunk record creation

mod chunker;
mod extractor;

pub use chunker::TextChunker;
pub use extractor::{file_extension, TextExtractor};

use crate::types::knowledge::{now_millis, KnowledgeChunk};

/// A raw uploaded file with its declared media type
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as uploaded
    pub name: String,
    /// Declared media type, when the upload carried one
    pub media_type: Option<String>,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Declared media type, falling back to a guess from the extension
    pub fn declared_type(&self) -> String {
        if let Some(t) = &self.media_type {
            if !t.is_empty() {
                return t.clone();
            }
        }
        mime_guess::from_path(&self.name)
            .first_raw()
            .unwrap_or("")
            .to_string()
    }
}

/// Extract-then-chunk pipeline producing persistable chunk records
pub struct IngestPipeline {
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a pipeline with the given chunking parameters
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunker: TextChunker::new(chunk_size, chunk_overlap),
        }
    }

    /// Convert a file into knowledge chunks. All chunks of one call share
    /// the file name and ingestion timestamp; ids carry the sequence index.
    pub fn ingest(&self, file: &UploadedFile) -> Vec<KnowledgeChunk> {
        let content = TextExtractor::extract(file);
        let pieces = self.chunker.split(&content);
        let timestamp = now_millis();

        pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| KnowledgeChunk::new(&file.name, piece, timestamp, index))
            .collect()
    }
}
