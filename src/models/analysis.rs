//! Execution analysis models.

use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generation::{Field, Shape, StructuredOutput};
use crate::models::{null_as_default, LEVELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// An issue found during execution analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExecutionIssue {
    /// Issue type
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Issue description
    pub description: String,
    /// Likely cause of the issue
    pub likely_cause: String,
}

/// A suggested code fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CodeFix {
    /// Fix description
    pub description: String,
    /// Code to fix the issue
    pub code_snippet: String,
    /// Why this fix works
    pub explanation: String,
    /// Confidence in this fix
    pub confidence: Confidence,
}

/// Analysis of code execution results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExecutionAnalysis {
    /// Whether execution was successful
    pub success: bool,
    /// Analysis summary
    pub summary: String,
    /// Found issues
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<ExecutionIssue>,
    /// Suggested fixes
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_fixes: Vec<CodeFix>,
    /// Recommended next steps
    pub next_steps: Vec<String>,
    /// Performance observations
    #[serde(default)]
    pub performance_notes: Option<String>,
}

static EXECUTION_ANALYSIS_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::Object(vec![
        Field::required("success", Shape::Boolean),
        Field::required("summary", Shape::String),
        Field::optional(
            "issues",
            Shape::array(Shape::Object(vec![
                Field::required("type", Shape::String),
                Field::required("description", Shape::String),
                Field::required("likely_cause", Shape::String),
            ])),
        ),
        Field::optional(
            "suggested_fixes",
            Shape::array(Shape::Object(vec![
                Field::required("description", Shape::String),
                Field::required("code_snippet", Shape::String),
                Field::required("explanation", Shape::String),
                Field::required("confidence", Shape::Literal(LEVELS)),
            ])),
        ),
        Field::required("next_steps", Shape::array(Shape::String)),
        Field::optional("performance_notes", Shape::String),
    ])
});

impl StructuredOutput for ExecutionAnalysis {
    fn shape() -> &'static Shape {
        &EXECUTION_ANALYSIS_SHAPE
    }
}
