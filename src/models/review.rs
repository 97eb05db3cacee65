//! Code review models.

use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generation::{Field, Shape, StructuredOutput};
use crate::models::{null_as_default, LEVELS};

pub const QUALITY_LEVELS: &[&str] = &["excellent", "good", "fair", "needs-improvement"];
pub const SEVERITIES: &[&str] = &["critical", "major", "minor", "info"];
pub const SUGGESTION_TYPES: &[&str] = &[
    "performance",
    "readability",
    "security",
    "best-practice",
    "refactoring",
];

/// Overall code quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OverallQuality {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl OverallQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallQuality::Excellent => "excellent",
            OverallQuality::Good => "good",
            OverallQuality::Fair => "fair",
            OverallQuality::NeedsImprovement => "needs-improvement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionType {
    Performance,
    Readability,
    Security,
    BestPractice,
    Refactoring,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::Performance => "performance",
            SuggestionType::Readability => "readability",
            SuggestionType::Security => "security",
            SuggestionType::BestPractice => "best-practice",
            SuggestionType::Refactoring => "refactoring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    #[default]
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// An issue found during code review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CodeIssue {
    /// Issue severity
    pub severity: Severity,
    /// Issue type (e.g., bug, security, performance)
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Issue description
    pub message: String,
    /// Line number where issue occurs
    #[serde(default)]
    pub line_number: Option<i64>,
    /// Suggested fix
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// A suggestion for code improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CodeSuggestion {
    /// Suggestion type
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    /// Suggestion description
    pub message: String,
    /// Example implementation
    #[serde(default)]
    pub example_code: Option<String>,
    /// Impact level
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: Impact,
}

/// Complete code review result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CodeReview {
    /// Review summary
    pub summary: String,
    /// Overall code quality
    pub overall_quality: OverallQuality,
    /// Found issues
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<CodeIssue>,
    /// Improvement suggestions
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<CodeSuggestion>,
    /// Code strengths
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    /// Test coverage assessment
    #[serde(default)]
    pub test_coverage_assessment: Option<String>,
}

/// A code review of a whole directory, with the request metadata overlaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DirectoryReview {
    #[serde(flatten)]
    pub review: CodeReview,
    /// Always "directory_review"
    pub review_type: String,
    pub directory_path: String,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

/// Free-text comparison of two implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Comparison {
    pub language: String,
    pub comparison: String,
}

static CODE_REVIEW_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::Object(vec![
        Field::required("summary", Shape::String),
        Field::required("overall_quality", Shape::Literal(QUALITY_LEVELS)),
        Field::optional(
            "issues",
            Shape::array(Shape::Object(vec![
                Field::required("severity", Shape::Literal(SEVERITIES)),
                Field::required("type", Shape::String),
                Field::required("message", Shape::String),
                Field::optional("line_number", Shape::Integer),
                Field::optional("suggestion", Shape::String),
            ])),
        ),
        Field::optional(
            "suggestions",
            Shape::array(Shape::Object(vec![
                Field::required("type", Shape::Literal(SUGGESTION_TYPES)),
                Field::required("message", Shape::String),
                Field::optional("example_code", Shape::String),
                Field::optional("impact", Shape::Literal(LEVELS)),
            ])),
        ),
        Field::optional("strengths", Shape::array(Shape::String)),
        Field::optional("test_coverage_assessment", Shape::String),
    ])
});

impl StructuredOutput for CodeReview {
    fn shape() -> &'static Shape {
        &CODE_REVIEW_SHAPE
    }
}
