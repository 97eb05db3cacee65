//! Review tools: single snippet, two-way comparison, whole directory.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::mcp::resources::read_directory_resource;
use crate::mcp::types::{CompareImplementationsInput, ReviewCodeInput, ReviewDirectoryInput};
use crate::mcp::PlanServer;
use crate::models::{CodeReview, Comparison, DirectoryReview};
use crate::services::ReviewRequest;
use crate::PlanMcpError;

/// Language tag used when a review spans a whole directory.
pub const DIRECTORY_LANGUAGE: &str = "mixed";
pub const DIRECTORY_REVIEW_TYPE: &str = "directory_review";

impl PlanServer {
    #[instrument(name = "mcp.review_code", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn handle_review_code(
        &self,
        input: ReviewCodeInput,
    ) -> Result<CodeReview, PlanMcpError> {
        let request = ReviewRequest {
            code: &input.code,
            language: &input.language,
            context: input.context.as_deref(),
            focus_areas: &input.focus_areas,
            previous_feedback: input.previous_feedback.as_deref(),
        };
        Ok(self.reviewer.review_code(&request).await?)
    }

    #[instrument(
        name = "mcp.compare_implementations",
        skip_all,
        fields(request_id = %Uuid::new_v4())
    )]
    pub async fn handle_compare_implementations(
        &self,
        input: CompareImplementationsInput,
    ) -> Result<Comparison, PlanMcpError> {
        Ok(self
            .reviewer
            .compare_implementations(
                &input.code_a,
                &input.code_b,
                &input.language,
                &input.comparison_criteria,
            )
            .await?)
    }

    /// Aggregate the directory, review it as one `mixed` snippet, then
    /// overlay the directory metadata.
    #[instrument(name = "mcp.review_directory", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn handle_review_directory(
        &self,
        input: ReviewDirectoryInput,
    ) -> Result<DirectoryReview, PlanMcpError> {
        info!("Reviewing directory {}", input.directory_path);
        let code = read_directory_resource(&input.directory_path).await?;
        let context = format!("Full directory review of {}", input.directory_path);

        let request = ReviewRequest {
            code: &code,
            language: DIRECTORY_LANGUAGE,
            context: Some(&context),
            focus_areas: &input.focus_areas,
            previous_feedback: None,
        };
        let review = self.reviewer.review_code(&request).await?;

        Ok(DirectoryReview {
            review,
            review_type: DIRECTORY_REVIEW_TYPE.to_string(),
            directory_path: input.directory_path,
            include_patterns: input.include_patterns,
            exclude_patterns: input.exclude_patterns,
        })
    }
}
