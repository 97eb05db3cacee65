//! Tool input types.
//!
//! Each struct is bound from a `tools/call` argument object; required fields
//! must be present and optional lists default to empty. The schemars schema
//! of each type is the tool's advertised input shape.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{null_as_default, ProjectPlan};
use crate::services::analyzer::DEFAULT_LANGUAGE;

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_include_patterns() -> Vec<String> {
    vec!["*".to_string()]
}

fn language_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_language))
}

fn include_patterns_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_else(default_include_patterns))
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanProjectInput {
    /// Detailed description of the project to plan
    pub description: String,
    /// List of specific requirements
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirements: Vec<String>,
    /// Constraints or limitations to consider
    #[serde(default, deserialize_with = "null_as_default")]
    pub constraints: Vec<String>,
    /// Preferred technologies
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RefinePlanInput {
    /// The plan to refine, as returned by plan_project
    pub current_plan: ProjectPlan,
    /// What should change
    pub feedback: String,
    #[serde(default)]
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReviewCodeInput {
    /// The code to review
    pub code: String,
    /// Programming language of the code
    pub language: String,
    /// Additional context about the code
    #[serde(default)]
    pub context: Option<String>,
    /// Specific areas to focus on (e.g. security, performance)
    #[serde(default, deserialize_with = "null_as_default")]
    pub focus_areas: Vec<String>,
    /// Feedback from a previous review, when this is a revision
    #[serde(default)]
    pub previous_feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeExecutionInput {
    /// The executed code
    pub code: String,
    /// Output from code execution
    pub execution_output: String,
    /// What the code should do
    #[serde(default)]
    pub expected_behavior: Option<String>,
    /// Any error messages
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_messages: Vec<String>,
    /// Programming language (default: python)
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    /// Descriptions of earlier fix attempts
    #[serde(default, deserialize_with = "null_as_default")]
    pub previous_attempts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReviewDirectoryInput {
    /// Absolute path of the directory to review
    pub directory_path: String,
    /// Specific areas to focus on
    #[serde(default, deserialize_with = "null_as_default")]
    pub focus_areas: Vec<String>,
    /// File patterns to include (default: ["*"])
    #[serde(
        default = "default_include_patterns",
        deserialize_with = "include_patterns_or_default"
    )]
    pub include_patterns: Vec<String>,
    /// File patterns to exclude
    #[serde(default, deserialize_with = "null_as_default")]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompareImplementationsInput {
    /// First implementation
    pub code_a: String,
    /// Second implementation
    pub code_b: String,
    /// Programming language of both implementations
    pub language: String,
    /// Criteria to compare on
    #[serde(default, deserialize_with = "null_as_default")]
    pub comparison_criteria: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DebugErrorInput {
    /// Code that produced the error
    pub code: String,
    /// The error message
    pub error_message: String,
    #[serde(default)]
    pub stack_trace: Option<String>,
    /// Programming language (default: python)
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    /// Additional context about when the error occurs
    #[serde(default)]
    pub context: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_lists_default_empty() {
        let input: PlanProjectInput =
            serde_json::from_value(json!({"description": "todo app"})).unwrap();
        assert!(input.requirements.is_empty());
        assert!(input.tech_stack.is_empty());
    }

    #[test]
    fn test_language_defaults_to_python() {
        let input: AnalyzeExecutionInput =
            serde_json::from_value(json!({"code": "1/0", "execution_output": "boom"})).unwrap();
        assert_eq!(input.language, "python");
    }

    #[test]
    fn test_directory_patterns_default() {
        let input: ReviewDirectoryInput =
            serde_json::from_value(json!({"directory_path": "/tmp"})).unwrap();
        assert_eq!(input.include_patterns, vec!["*".to_string()]);
        assert!(input.exclude_patterns.is_empty());
    }

    #[test]
    fn test_explicit_null_takes_defaults() {
        let input: ReviewDirectoryInput = serde_json::from_value(json!({
            "directory_path": "/tmp",
            "focus_areas": null,
            "include_patterns": null,
            "exclude_patterns": null
        }))
        .unwrap();
        assert_eq!(input.include_patterns, vec!["*".to_string()]);
        assert!(input.focus_areas.is_empty());
        assert!(input.exclude_patterns.is_empty());

        let input: DebugErrorInput = serde_json::from_value(json!({
            "code": "1/0",
            "error_message": "ZeroDivisionError",
            "language": null,
            "stack_trace": null
        }))
        .unwrap();
        assert_eq!(input.language, "python");
        assert!(input.stack_trace.is_none());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let err = serde_json::from_value::<ReviewCodeInput>(json!({"code": "x=1"})).unwrap_err();
        assert!(err.to_string().contains("language"));
    }
}
