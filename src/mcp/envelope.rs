//! Tool call envelopes.
//!
//! Every `tools/call` answer is a single text block of JSON: the typed result
//! on success, or a [`ToolFailure`] on any failure. Failures are flagged with
//! `is_error` but travel as ordinary content, never as a JSON-RPC error.

use rmcp::model::{CallToolResult, Content, IntoContents, JsonObject};
use serde::Serialize;
use serde_json::Value;

use crate::PlanMcpError;

#[derive(Debug, Clone, Serialize)]
pub struct ToolFailure {
    pub error: String,
    pub tool: String,
    /// The arguments exactly as received.
    pub arguments: Value,
    pub error_code: String,
}

impl ToolFailure {
    pub fn new(tool: &str, arguments: Option<&JsonObject>, err: &PlanMcpError) -> Self {
        Self {
            error: err.to_string(),
            tool: tool.to_string(),
            arguments: arguments
                .map(|a| Value::Object(a.clone()))
                .unwrap_or_else(|| Value::Object(JsonObject::new())),
            error_code: err.code().to_string(),
        }
    }
}

impl IntoContents for ToolFailure {
    fn into_contents(self) -> Vec<Content> {
        let json = serde_json::to_string_pretty(&self).unwrap_or_else(|_| self.error.clone());
        vec![Content::text(json)]
    }
}

pub fn success(payload: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Flagged `isError`, but the body is the same parseable JSON text either
/// way; clients should read the body regardless of the flag.
pub fn failure(failure: ToolFailure) -> CallToolResult {
    CallToolResult::error(failure.into_contents())
}
