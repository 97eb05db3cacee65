//! Execution analysis and debugging tools.

use tracing::instrument;
use uuid::Uuid;

use crate::mcp::types::{AnalyzeExecutionInput, DebugErrorInput};
use crate::mcp::PlanServer;
use crate::models::ExecutionAnalysis;
use crate::services::{ErrorReport, ExecutionReport};
use crate::PlanMcpError;

impl PlanServer {
    #[instrument(name = "mcp.analyze_execution", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn handle_analyze_execution(
        &self,
        input: AnalyzeExecutionInput,
    ) -> Result<ExecutionAnalysis, PlanMcpError> {
        let report = ExecutionReport {
            code: &input.code,
            execution_output: &input.execution_output,
            expected_behavior: input.expected_behavior.as_deref(),
            error_messages: &input.error_messages,
            language: &input.language,
            previous_attempts: &input.previous_attempts,
        };
        Ok(self.analyzer.analyze_execution(&report).await?)
    }

    #[instrument(name = "mcp.debug_error", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn handle_debug_error(
        &self,
        input: DebugErrorInput,
    ) -> Result<ExecutionAnalysis, PlanMcpError> {
        let report = ErrorReport {
            code: &input.code,
            error_message: &input.error_message,
            stack_trace: input.stack_trace.as_deref(),
            language: &input.language,
            context: input.context.as_deref(),
        };
        Ok(self.analyzer.debug_error(&report).await?)
    }
}
