//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text-completion providers behind the model gateway
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send an assembled prompt and return the normalized answer text
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
