//! Gemini `generateContent` client
//!
//! Single request/response, no retry, no gateway-level timeout. The
//! response envelope varies between deployments, so normalization walks an
//! ordered set of known shapes and never assumes a field is present.

use async_trait::async_trait;

use crate::config::GeminiConfig;
use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;

/// Fixed substitution for safety-blocked responses
const SAFETY_APOLOGY: &str =
    "I apologize, but I cannot respond to this query due to safety guidelines.";

/// Placeholder when no known response shape matched
const NO_RESPONSE: &str = "No response generated";

/// Client for the generative language API
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from configuration
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Response envelope; every field is optional by design
#[derive(Debug, serde::Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, serde::Deserialize)]
struct Candidate {
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, serde::Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

/// Collapse the envelope into answer text or a failure, checking known
/// shapes in order: safety block, nested candidate text, candidate-level
/// text, top-level text, explicit error, then a literal placeholder.
pub fn normalize_response(response: GenerateResponse) -> Result<String> {
    if let Some(candidates) = &response.candidates {
        if let Some(candidate) = candidates.first() {
            if candidate.finish_reason.as_deref() == Some("SAFETY") {
                return Ok(SAFETY_APOLOGY.to_string());
            }

            if let Some(text) = candidate
                .content
                .as_ref()
                .and_then(|c| c.parts.first())
                .and_then(|p| p.text.as_ref())
            {
                return Ok(text.clone());
            }

            if let Some(text) = &candidate.text {
                return Ok(text.clone());
            }

            return Ok(NO_RESPONSE.to_string());
        }
    }

    if let Some(text) = &response.text {
        return Ok(text.clone());
    }

    if let Some(error) = &response.error {
        let message = error
            .message
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::upstream(None, message));
    }

    Ok(NO_RESPONSE.to_string())
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            Error::Config(
                "Gemini API key not configured. Please set the GEMINI_API_KEY environment variable"
                    .to_string(),
            )
        })?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(None, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| "Unknown error".to_string());

            return Err(Error::upstream(Some(status), message));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(None, format!("Failed to parse response: {}", e)))?;

        normalize_response(envelope)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
