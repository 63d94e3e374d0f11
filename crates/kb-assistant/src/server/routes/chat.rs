//! Chat endpoint: retrieve, prompt, generate, persist

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::retrieval::KeywordSearcher;
use crate::server::state::AppState;
use crate::types::chat::{ChatRequest, ChatResponse, ContextChunk};
use crate::types::knowledge::ChatMessage;

/// POST /api/chat - Answer a question grounded in the knowledge base
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let start = Instant::now();

    if request.message.trim().is_empty() {
        return Err(Error::InvalidRequest("Message is required".to_string()));
    }

    tracing::info!("Chat: \"{}\"", request.message);

    // The user message is persisted before the model call; a failed call
    // leaves it in history, and callers reconcile from storage on reload.
    state
        .store()
        .add_message(&ChatMessage::user(&request.message))
        .await?;

    // Use supplied context when present, otherwise retrieve from the store
    let context = match request.context {
        Some(context) => context,
        None => retrieve_context(&state, &request.message).await?,
    };

    let sources: Vec<String> = context.iter().map(|c| c.file_name.clone()).collect();

    let prompt = PromptBuilder::build(&request.message, &context);
    let answer = state.llm().generate(&prompt).await?;

    state
        .store()
        .add_message(&ChatMessage::assistant(&answer))
        .await?;

    tracing::info!(
        "Chat answered in {}ms with {} context chunk(s)",
        start.elapsed().as_millis(),
        context.len()
    );

    Ok(Json(ChatResponse {
        message: answer,
        sources,
    }))
}

/// Rank stored chunks against the question; an empty result means "no
/// grounding available" and is not an error.
async fn retrieve_context(state: &AppState, question: &str) -> Result<Vec<ContextChunk>> {
    let chunks = state.store().list_chunks().await?;
    let searcher = KeywordSearcher::new(state.config().retrieval.top_k);

    Ok(searcher
        .search(question, &chunks)
        .into_iter()
        .map(|scored| ContextChunk {
            file_name: scored.chunk.file_name,
            content: scored.chunk.content,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::config::AssistantConfig;
    use crate::storage::Database;
    use crate::types::knowledge::KnowledgeChunk;

    fn test_state() -> AppState {
        AppState::with_store(AssistantConfig::default(), Database::in_memory().unwrap())
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_any_side_effect() {
        let state = test_state();

        let err = chat(
            State(state.clone()),
            Json(ChatRequest {
                message: "   ".to_string(),
                context: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        // Nothing was persisted
        assert!(state.store().list_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_api_key_fails_after_persisting_the_user_message() {
        // Default config carries no API key, so the gateway reports a
        // configuration error on the first request.
        let state = test_state();

        let err = chat(
            State(state.clone()),
            Json(ChatRequest {
                message: "hello there".to_string(),
                context: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let history = state.store().list_messages().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "hello there");
    }

    #[tokio::test]
    async fn retrieval_pulls_matching_chunks_from_the_store() {
        let state = test_state();

        state
            .store()
            .add_chunk(&KnowledgeChunk::new(
                "fox.txt",
                "the fox jumps".to_string(),
                1,
                0,
            ))
            .await
            .unwrap();
        state
            .store()
            .add_chunk(&KnowledgeChunk::new(
                "dog.txt",
                "the dog sleeps".to_string(),
                1,
                0,
            ))
            .await
            .unwrap();

        let context = retrieve_context(&state, "fox").await.unwrap();
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].file_name, "fox.txt");
    }
}
