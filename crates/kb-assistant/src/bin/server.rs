//! Assistant server binary
//!
//! Run with: cargo run -p kb-assistant --bin kb-assistant-server

use kb_assistant::{config::AssistantConfig, server::AssistantServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kb_assistant=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AssistantConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.gemini.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Chunk overlap: {}", config.chunking.chunk_overlap);
    tracing::info!("  - Top-k: {}", config.retrieval.top_k);
    tracing::info!("  - Store: {}", config.storage.db_path.display());

    let server = AssistantServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/chat      - Ask questions");
    println!("  POST /api/ingest    - Upload knowledge files");
    println!("  GET  /api/knowledge - List knowledge files");
    println!("  GET  /api/history   - Chat history");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
