//! Overlapping, boundary-aware text chunking

/// Sliding-window text chunker with configurable size and overlap
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split text into overlapping, trimmed, non-empty chunks.
    ///
    /// Windows prefer to end on a period or newline when one lies past the
    /// window midpoint. The window advance is clamped to at least one
    /// character so the loop makes forward progress even when
    /// `overlap >= chunk_size`; an iteration cap bounds pathological
    /// size/overlap combinations on top of that.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();

        if chars.len() <= self.chunk_size {
            let trimmed = text.trim();
            return if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            };
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let mut iterations = 0usize;
        let stride = self.chunk_size.saturating_sub(self.overlap).max(1);
        let max_iterations = chars.len() / stride + 10;

        while start < chars.len() && iterations < max_iterations {
            iterations += 1;
            let end = (start + self.chunk_size).min(chars.len());
            let mut window = &chars[start..end];

            // Snap non-final windows to a sentence or line boundary when
            // one lies past the midpoint.
            if end < chars.len() && window.len() > 100 {
                let last_break = window
                    .iter()
                    .rposition(|&c| c == '.' || c == '\n');
                if let Some(pos) = last_break {
                    if pos > window.len() / 2 {
                        window = &window[..pos + 1];
                    }
                }
            }

            let chunk: String = window.iter().collect();
            let trimmed = chunk.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            // Forward-progress guarantee
            start += window.len().saturating_sub(self.overlap).max(1);
        }

        chunks
    }
}
