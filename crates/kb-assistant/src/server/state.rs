//! Application state for the assistant server

use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::providers::{GeminiClient, LlmProvider};
use crate::storage::Database;

/// Shared application state. The store handle is constructed once here and
/// passed to every component that needs persistence.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AssistantConfig,
    store: Database,
    llm: Arc<dyn LlmProvider>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AssistantConfig) -> Result<Self> {
        tracing::info!("Initializing assistant state...");

        let store = Database::open(&config.storage.db_path)?;
        tracing::info!("Knowledge store ready at {}", config.storage.db_path.display());

        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config.gemini));
        tracing::info!("Model gateway ready (model: {})", config.gemini.model);
        if config.gemini.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail until it is");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { config, store, llm }),
        })
    }

    /// Build state around an existing store (used by tests)
    pub fn with_store(config: AssistantConfig, store: Database) -> Self {
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config.gemini));
        Self {
            inner: Arc::new(AppStateInner { config, store, llm }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    /// Get the store handle
    pub fn store(&self) -> &Database {
        &self.inner.store
    }

    /// Get the model gateway
    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }
}
