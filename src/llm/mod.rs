//! Model access layer.
//!
//! All Gemini calls go through the [`GenerativeModel`] trait so the
//! orchestrator can be exercised against a deterministic stub. The trait
//! has exactly two operations: schema-constrained structured extraction
//! and free-text generation.

pub mod gemini;
pub mod prompts;
pub mod schema;

pub use gemini::{GeminiClient, GeminiConfig};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from a model call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,

    #[error("invalid response: {0}")]
    Invalid(String),
}

/// An opaque, schema-constrained generative model.
///
/// No retry is performed behind this trait; a retry policy, if wanted,
/// wraps it.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Request a response constrained to `schema`, returned as parsed JSON.
    async fn extract_structured(
        &self,
        system: &str,
        prompt: &str,
        schema: &Value,
        temperature: f32,
    ) -> Result<Value, LlmError>;

    /// Request a free-text completion.
    async fn generate_text(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError>;
}
