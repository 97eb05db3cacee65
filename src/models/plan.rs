//! Project plan model.

use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generation::{Field, Shape, StructuredOutput};
use crate::models::{null_as_default, LEVELS};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// A single task in a project plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    /// Unique task identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Detailed task description
    pub description: String,
    /// Task priority
    pub priority: Priority,
    /// Estimated time/effort
    #[serde(default)]
    pub estimated_effort: Option<String>,
    /// Task IDs this depends on
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
    /// Success criteria
    #[serde(default, deserialize_with = "null_as_default")]
    pub acceptance_criteria: Vec<String>,
}

/// A phase in the project plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Phase {
    /// Phase name
    pub name: String,
    /// Phase description
    pub description: String,
    /// Tasks in this phase
    pub tasks: Vec<Task>,
    /// Key milestone for this phase
    #[serde(default)]
    pub milestone: Option<String>,
}

/// Complete project plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectPlan {
    /// Project name
    pub project_name: String,
    /// Project overview
    pub overview: String,
    /// Project phases
    pub phases: Vec<Phase>,
    /// Total estimated duration
    #[serde(default)]
    pub estimated_duration: Option<String>,
    /// Key project risks
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_risks: Vec<String>,
    /// Technical requirements
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_requirements: Vec<String>,
}

impl ProjectPlan {
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|p| p.tasks.len()).sum()
    }
}

static TASK_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::Object(vec![
        Field::required("id", Shape::String),
        Field::required("title", Shape::String),
        Field::required("description", Shape::String),
        Field::required("priority", Shape::Literal(LEVELS)),
        Field::optional("estimated_effort", Shape::String),
        Field::optional("dependencies", Shape::array(Shape::String)),
        Field::optional("acceptance_criteria", Shape::array(Shape::String)),
    ])
});

static PROJECT_PLAN_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::Object(vec![
        Field::required("project_name", Shape::String),
        Field::required("overview", Shape::String),
        Field::required(
            "phases",
            Shape::array(Shape::Object(vec![
                Field::required("name", Shape::String),
                Field::required("description", Shape::String),
                Field::required("tasks", Shape::array(TASK_SHAPE.clone())),
                Field::optional("milestone", Shape::String),
            ])),
        ),
        Field::optional("estimated_duration", Shape::String),
        Field::optional("key_risks", Shape::array(Shape::String)),
        Field::optional("tech_requirements", Shape::array(Shape::String)),
    ])
});

impl StructuredOutput for ProjectPlan {
    fn shape() -> &'static Shape {
        &PROJECT_PLAN_SHAPE
    }
}
