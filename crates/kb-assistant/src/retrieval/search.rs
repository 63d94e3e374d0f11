//! Term-frequency scoring and ranking of knowledge chunks

use crate::types::knowledge::{KnowledgeChunk, ScoredChunk};

/// Keyword searcher returning a bounded top-K of matching chunks
pub struct KeywordSearcher {
    top_k: usize,
}

impl KeywordSearcher {
    /// Create a searcher with the given result bound
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Score and rank chunks against a query.
    ///
    /// The query is lower-cased and split on whitespace; each chunk's score
    /// is the sum over terms of non-overlapping literal occurrence counts
    /// in the lower-cased content. Zero-score chunks are excluded, the rest
    /// sorted by score descending (stable), truncated to `top_k`. An empty
    /// result is a valid "no grounding available" outcome, not an error.
    pub fn search(&self, query: &str, chunks: &[KnowledgeChunk]) -> Vec<ScoredChunk> {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();

        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .filter_map(|chunk| {
                let content = chunk.content.to_lowercase();
                let score: usize = terms.iter().map(|t| content.matches(t).count()).sum();

                if score > 0 {
                    Some(ScoredChunk {
                        chunk: chunk.clone(),
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.top_k);
        scored
    }
}
