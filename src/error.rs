use thiserror::Error;

use crate::generation::{BackendError, GenerationError};

/// Custom error type for plan-mcp operations.
#[derive(Debug, Error)]
pub enum PlanMcpError {
    /// Required configuration is missing or invalid. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The generation backend failed (transport, auth, quota).
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Structured generation failed after exhausting its attempts.
    #[error(transparent)]
    Generation(GenerationError),

    /// No tool is registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments could not be bound to the tool's input type.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A resource URI did not resolve to an existing file or directory.
    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PlanMcpError {
    /// Stable machine-readable code used in failure envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            PlanMcpError::Configuration(_) => "CONFIGURATION_ERROR",
            PlanMcpError::Backend(_) => "BACKEND_FAILURE",
            PlanMcpError::Generation(GenerationError::InvalidRequest(_)) => "INVALID_PARAMS",
            PlanMcpError::Generation(_) => "GENERATION_FAILURE",
            PlanMcpError::UnknownTool(_) => "UNKNOWN_TOOL",
            PlanMcpError::InvalidArguments(_) => "INVALID_PARAMS",
            PlanMcpError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            PlanMcpError::Io { .. } => "IO_ERROR",
            PlanMcpError::Serialization(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<GenerationError> for PlanMcpError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Backend(inner) => PlanMcpError::Backend(inner),
            other => PlanMcpError::Generation(other),
        }
    }
}

impl From<serde_json::Error> for PlanMcpError {
    fn from(err: serde_json::Error) -> Self {
        PlanMcpError::Serialization(err.to_string())
    }
}
