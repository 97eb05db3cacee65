//! Planning tools.

use tracing::instrument;
use uuid::Uuid;

use crate::mcp::types::{PlanProjectInput, RefinePlanInput};
use crate::mcp::PlanServer;
use crate::models::ProjectPlan;
use crate::services::PlanBrief;
use crate::PlanMcpError;

impl PlanServer {
    #[instrument(name = "mcp.plan_project", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn handle_plan_project(
        &self,
        input: PlanProjectInput,
    ) -> Result<ProjectPlan, PlanMcpError> {
        let brief = PlanBrief {
            description: &input.description,
            requirements: &input.requirements,
            constraints: &input.constraints,
            tech_stack: &input.tech_stack,
        };
        Ok(self.planner.create_plan(&brief).await?)
    }

    #[instrument(name = "mcp.refine_plan", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn handle_refine_plan(
        &self,
        input: RefinePlanInput,
    ) -> Result<ProjectPlan, PlanMcpError> {
        Ok(self
            .planner
            .refine_plan(
                &input.current_plan,
                &input.feedback,
                input.additional_context.as_deref(),
            )
            .await?)
    }
}
