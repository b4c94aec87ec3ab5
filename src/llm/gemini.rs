//! Gemini API client.
//!
//! Wraps the `generateContent` REST endpoint behind [`GenerativeModel`].
//! Structured extraction pins `responseMimeType` to JSON and attaches the
//! response schema; free-text generation leaves the output unconstrained.

use crate::llm::{GenerativeModel, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const API_VERSION: &str = "v1beta";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL, e.g. "https://generativelanguage.googleapis.com".
    pub api_url: String,
    /// API key, sent via the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. "gemini-2.5-flash".
    pub model_name: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// The Gemini model client.
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            API_VERSION,
            self.config.model_name
        )
    }

    /// Send one generation request and return the first candidate's text.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        generation_config: GenerationConfig,
    ) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            generation_config,
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(LlmError::EmptyContent)?;

        debug!("Gemini returned {} bytes", text.len());

        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn extract_structured(
        &self,
        system: &str,
        prompt: &str,
        schema: &Value,
        temperature: f32,
    ) -> Result<Value, LlmError> {
        let text = self
            .generate(
                system,
                prompt,
                GenerationConfig {
                    temperature,
                    response_mime_type: Some("application/json"),
                    response_schema: Some(schema.clone()),
                },
            )
            .await?;

        Ok(serde_json::from_str(text.trim())?)
    }

    async fn generate_text(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let text = self
            .generate(
                system,
                prompt,
                GenerationConfig {
                    temperature,
                    response_mime_type: None,
                    response_schema: None,
                },
            )
            .await?;

        Ok(text.trim().to_string())
    }
}
