//! Structured generation engine.
//!
//! Turns free-text completions into validated typed results. Each attempt
//! reissues the identical request; formatting noise from the backend is the
//! only thing retries absorb. Backend failures are never retried.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::generation::client::{BackendError, CompletionRequest, TextGenerator};
use crate::generation::extract::extract_payload;
use crate::generation::prompt::Prompt;
use crate::generation::schema::{validate, StructuredOutput, ValidationError};

/// Default number of attempts per structured call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default sampling temperature for structured calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sampling and retry parameters for a structured call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// Must be within [0, 1].
    pub temperature: f32,
    /// Must be at least 1.
    pub max_attempts: u32,
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_output_tokens: None,
        }
    }
}

impl GenerationOptions {
    fn check(&self) -> Result<(), GenerationError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(GenerationError::InvalidRequest(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if self.max_attempts == 0 {
            return Err(GenerationError::InvalidRequest(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Failure of a structured generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend itself failed. Surfaced on the attempt it happened.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Every attempt produced unparseable or invalid output.
    #[error("Failed to generate valid JSON after {attempts} attempt(s): {last_error}")]
    Exhausted {
        attempts: u32,
        last_error: ValidationError,
        /// Raw backend text of the final attempt.
        last_raw: String,
    },

    /// The call was rejected before reaching the backend.
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),
}

/// One failed attempt. Kept only until the call returns.
#[derive(Debug)]
struct Attempt {
    index: u32,
    raw: String,
    error: ValidationError,
}

/// Retrying pipeline: generation client -> extractor -> validator.
#[derive(Clone)]
pub struct StructuredGenerator {
    client: Arc<dyn TextGenerator>,
    defaults: GenerationOptions,
}

impl StructuredGenerator {
    pub fn new(client: Arc<dyn TextGenerator>) -> Self {
        Self {
            client,
            defaults: GenerationOptions::default(),
        }
    }

    /// Override the options used by [`generate`](Self::generate).
    pub fn with_defaults(mut self, defaults: GenerationOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> GenerationOptions {
        self.defaults
    }

    pub fn client(&self) -> &Arc<dyn TextGenerator> {
        &self.client
    }

    /// Generate a `T` using the engine's default options.
    pub async fn generate<T: StructuredOutput>(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<T, GenerationError> {
        self.generate_structured(prompt, system_instruction, self.defaults)
            .await
    }

    /// Generate a `T`, validated against `T::shape()`.
    pub async fn generate_structured<T: StructuredOutput>(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        options: GenerationOptions,
    ) -> Result<T, GenerationError> {
        let prompt = Prompt::new(prompt)
            .with_system(system_instruction)
            .with_schema(&T::schema_json());
        self.run(&prompt, options).await
    }

    /// Free-text completion with no schema, for tools that return prose.
    pub async fn generate_text(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        let request = CompletionRequest::new(prompt)
            .with_system_instruction(system_instruction.map(str::to_string))
            .with_temperature(temperature);
        Ok(self.client.complete(&request).await?)
    }

    async fn run<T: StructuredOutput>(
        &self,
        prompt: &Prompt,
        options: GenerationOptions,
    ) -> Result<T, GenerationError> {
        if prompt.user().trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        options.check()?;

        let request = CompletionRequest::new(prompt.user())
            .with_system_instruction(prompt.system_instruction())
            .with_temperature(options.temperature)
            .with_max_output_tokens(options.max_output_tokens);

        let mut last: Option<Attempt> = None;
        for index in 1..=options.max_attempts {
            debug!(
                attempt = index,
                max_attempts = options.max_attempts,
                model = self.client.model_id(),
                "Requesting structured completion"
            );

            let raw = self.client.complete(&request).await.map_err(|e| {
                error!(attempt = index, "Backend failure: {}", e);
                GenerationError::Backend(e)
            })?;

            match accept::<T>(&raw) {
                Ok(result) => {
                    if index > 1 {
                        info!(attempt = index, "Structured completion recovered after retry");
                    }
                    return Ok(result);
                }
                Err(err) => {
                    warn!(
                        attempt = index,
                        max_attempts = options.max_attempts,
                        raw = %raw,
                        "JSON parsing attempt {} failed: {}",
                        index,
                        err
                    );
                    last = Some(Attempt {
                        index,
                        raw,
                        error: err,
                    });
                }
            }
        }

        // max_attempts >= 1, so at least one attempt was recorded.
        let attempt = last.unwrap_or(Attempt {
            index: 0,
            raw: String::new(),
            error: ValidationError::malformed("no attempt was made"),
        });
        error!(
            attempts = attempt.index,
            "Failed to parse JSON after {} attempts; raw response: {}",
            attempt.index,
            attempt.raw
        );
        Err(GenerationError::Exhausted {
            attempts: attempt.index,
            last_error: attempt.error,
            last_raw: attempt.raw,
        })
    }
}

/// Extract, validate against the shape, then bind to `T`. A payload the
/// shape admits but `T` rejects fails the attempt like any other.
fn accept<T: StructuredOutput>(raw: &str) -> Result<T, ValidationError> {
    let value = validate(extract_payload(raw), T::shape())?;
    serde_json::from_value(value).map_err(|e| ValidationError::malformed(e.to_string()))
}
