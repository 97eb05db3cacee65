//! Text generation backend and the structured generation pipeline.
//!
//! Data flow for a structured call:
//! [`Prompt`] -> [`TextGenerator::complete`] -> [`extract_payload`] ->
//! [`validate`] -> typed result, with bounded retry in [`StructuredGenerator`].

pub mod client;
pub mod engine;
pub mod extract;
pub mod gemini;
pub mod prompt;
pub mod schema;

pub use client::{BackendError, CompletionRequest, TextGenerator};
pub use engine::{GenerationError, GenerationOptions, StructuredGenerator};
pub use extract::extract_payload;
pub use gemini::{GeminiClient, GeminiConfig, SafetyThreshold};
pub use prompt::Prompt;
pub use schema::{validate, Field, Shape, StructuredOutput, ValidationError, ValidationReason};
