//! Project planning on top of structured generation.

use tracing::{error, info};

use crate::generation::{GenerationError, StructuredGenerator};
use crate::models::ProjectPlan;
use crate::services::prompts::{bullets, PROJECT_PLANNER_PROMPT};

/// Inputs for a new plan. Empty lists are omitted from the prompt.
#[derive(Debug, Clone, Default)]
pub struct PlanBrief<'a> {
    pub description: &'a str,
    pub requirements: &'a [String],
    pub constraints: &'a [String],
    pub tech_stack: &'a [String],
}

#[derive(Clone)]
pub struct ProjectPlanner {
    engine: StructuredGenerator,
}

impl ProjectPlanner {
    pub fn new(engine: StructuredGenerator) -> Self {
        Self { engine }
    }

    pub async fn create_plan(&self, brief: &PlanBrief<'_>) -> Result<ProjectPlan, GenerationError> {
        info!("Creating project plan");
        let prompt = build_plan_prompt(brief);

        let plan: ProjectPlan = self
            .engine
            .generate(&prompt, Some(PROJECT_PLANNER_PROMPT))
            .await
            .inspect_err(|e| error!("Failed to create project plan: {}", e))?;

        info!(
            "Created project plan with {} phases ({} tasks)",
            plan.phases.len(),
            plan.task_count()
        );
        Ok(plan)
    }

    /// Revise an existing plan according to `feedback`.
    pub async fn refine_plan(
        &self,
        current_plan: &ProjectPlan,
        feedback: &str,
        additional_context: Option<&str>,
    ) -> Result<ProjectPlan, GenerationError> {
        info!("Refining project plan based on feedback");
        let current = serde_json::to_string_pretty(current_plan)
            .map_err(|e| GenerationError::InvalidRequest(e.to_string()))?;
        let prompt = build_refine_prompt(&current, feedback, additional_context);

        let plan: ProjectPlan = self
            .engine
            .generate(&prompt, Some(PROJECT_PLANNER_PROMPT))
            .await
            .inspect_err(|e| error!("Failed to refine project plan: {}", e))?;

        info!("Successfully refined project plan");
        Ok(plan)
    }
}

pub fn build_plan_prompt(brief: &PlanBrief<'_>) -> String {
    let mut parts = vec![format!("Project Description: {}", brief.description)];

    if !brief.requirements.is_empty() {
        parts.push(format!("Requirements:\n{}", bullets(brief.requirements)));
    }
    if !brief.constraints.is_empty() {
        parts.push(format!("Constraints:\n{}", bullets(brief.constraints)));
    }
    if !brief.tech_stack.is_empty() {
        parts.push(format!("Technology Stack: {}", brief.tech_stack.join(", ")));
    }

    parts.push(
        "\nPlease create a comprehensive project plan with phases, tasks, and estimates."
            .to_string(),
    );
    parts.join("\n\n")
}

fn build_refine_prompt(current: &str, feedback: &str, additional_context: Option<&str>) -> String {
    let context = additional_context
        .map(|c| format!("Additional Context: {}\n\n", c))
        .unwrap_or_default();
    format!(
        "Current Project Plan:\n{}\n\nFeedback:\n{}\n\n{}Please refine the project plan based on the feedback while maintaining its overall structure and quality.",
        current, feedback, context
    )
}
