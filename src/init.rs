//! Shared initialization logic for MCP and CLI modes.

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::generation::{GeminiClient, StructuredGenerator, TextGenerator};
use crate::mcp::{ResourceRegistry, ServerIdentity, ToolRegistry};
use crate::services::{CodeReviewer, ExecutionAnalyzer, ProjectPlanner};

/// Application context holding the generation pipeline, domain services,
/// and registries.
///
/// Shared between MCP server and CLI commands.
#[derive(Clone)]
pub struct AppContext {
    pub engine: StructuredGenerator,
    pub planner: ProjectPlanner,
    pub reviewer: CodeReviewer,
    pub analyzer: ExecutionAnalyzer,
    pub tools: Arc<ToolRegistry>,
    pub resources: Arc<ResourceRegistry>,
    pub identity: ServerIdentity,
}

impl AppContext {
    /// Build the Gemini-backed context. Fails without an API key.
    pub fn new(config: &Config) -> Result<Self> {
        let gemini = GeminiClient::new(config.gemini_config()?)?;
        tracing::info!("Using Gemini model {}", config.model);
        Self::with_client(Arc::new(gemini), config)
    }

    /// Build around any generation client.
    pub fn with_client(client: Arc<dyn TextGenerator>, config: &Config) -> Result<Self> {
        config.validate()?;
        let engine = StructuredGenerator::new(client).with_defaults(config.generation_options());

        Ok(Self {
            planner: ProjectPlanner::new(engine.clone()),
            reviewer: CodeReviewer::new(engine.clone()),
            analyzer: ExecutionAnalyzer::new(engine.clone()),
            engine,
            tools: Arc::new(ToolRegistry::new()?),
            resources: Arc::new(ResourceRegistry::new()),
            identity: config.identity(),
        })
    }
}
