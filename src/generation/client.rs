//! Generation client contract.
//!
//! A [`TextGenerator`] issues one prompt to the backend and returns the raw
//! completion text verbatim. Cleanup and validation happen downstream.

use async_trait::async_trait;
use thiserror::Error;

/// A single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// User content.
    pub prompt: String,
    /// Optional system instruction sent alongside the user content.
    pub system_instruction: Option<String>,
    /// Sampling temperature. Not range-checked at this layer.
    pub temperature: f32,
    /// Optional cap on generated tokens.
    pub max_output_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            temperature: 0.7,
            max_output_tokens: None,
        }
    }

    pub fn with_system_instruction(mut self, system_instruction: Option<String>) -> Self {
        self.system_instruction = system_instruction;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Transport, auth or quota failure talking to the backend.
///
/// Never retried by the structured generation engine.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend response could not be decoded: {0}")]
    Decode(String),

    #[error("Backend returned no candidates{}", .reason.as_ref().map(|r| format!(" (blocked: {})", r)).unwrap_or_default())]
    NoCandidates { reason: Option<String> },

    /// A candidate came back with no text, e.g. stopped for SAFETY,
    /// RECITATION or MAX_TOKENS.
    #[error("Backend returned an empty candidate{}", .finish_reason.as_ref().map(|r| format!(" (finish reason: {})", r)).unwrap_or_default())]
    EmptyCandidate { finish_reason: Option<String> },

    #[error("Backend client error: {0}")]
    Other(String),
}

/// Text-generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the backend's completion for `request`, verbatim.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;

    /// Model identifier, for logging.
    fn model_id(&self) -> &str;
}
