use std::sync::Arc;

use rmcp::{
    model::*, service::RequestContext, ErrorData as McpError, RoleServer, ServerHandler,
    ServiceExt,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::mcp::envelope::{self, ToolFailure};
use crate::mcp::prompts::{
    get_master_controller_prompt, master_controller_arguments, MASTER_CONTROLLER_NAME,
};
use crate::mcp::registry::{ResourceKind, ResourceRegistry, ToolKind, ToolRegistry};
use crate::mcp::resources::read_file_resource;
use crate::services::{CodeReviewer, ExecutionAnalyzer, ProjectPlanner};
use crate::PlanMcpError;

/// Name and version reported during the initialize handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: "plan-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

const INSTRUCTIONS: &str = r#"# Plan MCP

AI-assisted planning, code review, and execution analysis.

## Tools
- plan_project: Project plan with phases, tasks, estimates, risks
- refine_plan: Revise a plan from feedback
- review_code: Issues, suggestions, strengths, overall quality
- review_directory: Review every source file under a directory
- compare_implementations: Side-by-side comparison of two implementations
- analyze_execution: Diagnose execution output and errors
- debug_error: Fixes for a specific error and stack trace

## Resources
- file://{path}: File content, or a directory listing plus all source files

## Prompts
- master_controller: Plan / task / review / approve workflow

Tool failures come back as JSON content with error, tool, arguments, error_code.
"#;

/// MCP server for planning, review, and analysis tools.
#[derive(Clone)]
pub struct PlanServer {
    pub(crate) planner: ProjectPlanner,
    pub(crate) reviewer: CodeReviewer,
    pub(crate) analyzer: ExecutionAnalyzer,
    tools: Arc<ToolRegistry>,
    resources: Arc<ResourceRegistry>,
    identity: ServerIdentity,
}

impl PlanServer {
    /// Create server from shared AppContext.
    pub fn from_context(ctx: &crate::init::AppContext) -> Self {
        Self {
            planner: ctx.planner.clone(),
            reviewer: ctx.reviewer.clone(),
            analyzer: ctx.analyzer.clone(),
            tools: ctx.tools.clone(),
            resources: ctx.resources.clone(),
            identity: ctx.identity.clone(),
        }
    }

    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run the named tool. Always yields an envelope: unknown names, bad
    /// arguments, and handler failures become failure envelopes.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let kind = match self.tools.get(name) {
            Ok(descriptor) => descriptor.kind,
            Err(e) => {
                warn!("Rejected call to unknown tool '{}'", name);
                return envelope::failure(ToolFailure::new(name, arguments.as_ref(), &e));
            }
        };

        info!("Calling tool {}", name);
        match self.run_tool(kind, arguments.as_ref()).await {
            Ok(payload) => envelope::success(&payload),
            Err(e) => {
                error!(tool = name, error_code = e.code(), "Tool call failed: {}", e);
                envelope::failure(ToolFailure::new(name, arguments.as_ref(), &e))
            }
        }
    }

    async fn run_tool(
        &self,
        kind: ToolKind,
        arguments: Option<&JsonObject>,
    ) -> Result<Value, PlanMcpError> {
        match kind {
            ToolKind::PlanProject => payload(self.handle_plan_project(bind(arguments)?).await?),
            ToolKind::RefinePlan => payload(self.handle_refine_plan(bind(arguments)?).await?),
            ToolKind::ReviewCode => payload(self.handle_review_code(bind(arguments)?).await?),
            ToolKind::CompareImplementations => {
                payload(self.handle_compare_implementations(bind(arguments)?).await?)
            }
            ToolKind::AnalyzeExecution => {
                payload(self.handle_analyze_execution(bind(arguments)?).await?)
            }
            ToolKind::DebugError => payload(self.handle_debug_error(bind(arguments)?).await?),
            ToolKind::ReviewDirectory => {
                payload(self.handle_review_directory(bind(arguments)?).await?)
            }
        }
    }

    /// Resolve a resource URI to its text.
    pub async fn read_uri(&self, uri: &str) -> Result<String, PlanMcpError> {
        let (rule, path) = self.resources.resolve(uri)?;
        match rule.kind {
            ResourceKind::File => read_file_resource(path).await,
        }
    }
}

/// Bind a call's argument object to a tool input type.
fn bind<T: DeserializeOwned>(arguments: Option<&JsonObject>) -> Result<T, PlanMcpError> {
    let value = Value::Object(arguments.cloned().unwrap_or_default());
    serde_json::from_value(value).map_err(|e| PlanMcpError::InvalidArguments(e.to_string()))
}

fn payload<T: Serialize>(result: T) -> Result<Value, PlanMcpError> {
    Ok(serde_json::to_value(result)?)
}

impl From<PlanMcpError> for McpError {
    fn from(err: PlanMcpError) -> Self {
        match &err {
            PlanMcpError::ResourceNotFound { .. } => McpError::resource_not_found(
                err.to_string(),
                Some(serde_json::json!({ "error_code": err.code() })),
            ),
            PlanMcpError::InvalidArguments(_) | PlanMcpError::UnknownTool(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            _ => McpError::internal_error(
                err.to_string(),
                Some(serde_json::json!({ "error_code": err.code() })),
            ),
        }
    }
}

impl ServerHandler for PlanServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                title: Some("Plan MCP".to_string()),
                version: self.identity.version.clone(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(&request.name, request.arguments).await)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        // Paths are open-ended; they are advertised as templates only.
        Ok(ListResourcesResult {
            resources: vec![],
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resources.templates(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = &request.uri;
        let text = self.read_uri(uri).await.map_err(|e| {
            warn!("Resource read failed for {}: {}", uri, e);
            McpError::from(e)
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some("text/plain".to_string()),
                text,
                meta: None,
            }],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: vec![Prompt::new(
                MASTER_CONTROLLER_NAME,
                Some("Orchestrate a project: plan, assign tasks, review code and execution results"),
                Some(master_controller_arguments()),
            )],
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        match request.name.as_str() {
            MASTER_CONTROLLER_NAME => Ok(get_master_controller_prompt(request.arguments)),
            _ => Err(McpError::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            )),
        }
    }
}

pub async fn run_mcp_server(ctx: crate::init::AppContext) -> anyhow::Result<()> {
    let server = PlanServer::from_context(&ctx);
    let tool_count = server.tool_registry().len();

    info!(
        "Starting {} MCP server v{} (model {})",
        ctx.identity.name,
        ctx.identity.version,
        ctx.engine.client().model_id()
    );

    // Stdio transport
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;
    info!("MCP server listening on stdio ({} tools)", tool_count);

    tokio::select! {
        result = service.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("MCP server shutting down");
    Ok(())
}
