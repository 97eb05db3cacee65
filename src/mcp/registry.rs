//! Tool and resource registries.
//!
//! Both registries are built once at startup and are read-only afterwards.
//! Tool names resolve to a [`ToolKind`], a closed set of identifiers each
//! bound to one typed handler on the server.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rmcp::model::{Annotated, JsonObject, RawResourceTemplate, ResourceTemplate, Tool};
use schemars::JsonSchema;

use crate::mcp::types::{
    AnalyzeExecutionInput, CompareImplementationsInput, DebugErrorInput, PlanProjectInput,
    RefinePlanInput, ReviewCodeInput, ReviewDirectoryInput,
};
use crate::PlanMcpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    PlanProject,
    RefinePlan,
    ReviewCode,
    CompareImplementations,
    AnalyzeExecution,
    DebugError,
    ReviewDirectory,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::PlanProject,
        ToolKind::RefinePlan,
        ToolKind::ReviewCode,
        ToolKind::CompareImplementations,
        ToolKind::AnalyzeExecution,
        ToolKind::DebugError,
        ToolKind::ReviewDirectory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::PlanProject => "plan_project",
            ToolKind::RefinePlan => "refine_plan",
            ToolKind::ReviewCode => "review_code",
            ToolKind::CompareImplementations => "compare_implementations",
            ToolKind::AnalyzeExecution => "analyze_execution",
            ToolKind::DebugError => "debug_error",
            ToolKind::ReviewDirectory => "review_directory",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::PlanProject => {
                "Create a detailed project plan with phases, tasks, and estimates."
            }
            ToolKind::RefinePlan => "Refine an existing project plan based on feedback.",
            ToolKind::ReviewCode => {
                "Review code and return issues, suggestions, strengths, and an overall quality rating."
            }
            ToolKind::CompareImplementations => {
                "Compare two implementations of the same functionality and recommend one."
            }
            ToolKind::AnalyzeExecution => {
                "Analyze code execution output and errors; suggest fixes and next steps."
            }
            ToolKind::DebugError => {
                "Debug a specific error with its code, message, and optional stack trace."
            }
            ToolKind::ReviewDirectory => {
                "Review every source file in a directory as one codebase."
            }
        }
    }

    fn input_schema(self) -> JsonObject {
        match self {
            ToolKind::PlanProject => schema_object::<PlanProjectInput>(),
            ToolKind::RefinePlan => schema_object::<RefinePlanInput>(),
            ToolKind::ReviewCode => schema_object::<ReviewCodeInput>(),
            ToolKind::CompareImplementations => schema_object::<CompareImplementationsInput>(),
            ToolKind::AnalyzeExecution => schema_object::<AnalyzeExecutionInput>(),
            ToolKind::DebugError => schema_object::<DebugErrorInput>(),
            ToolKind::ReviewDirectory => schema_object::<ReviewDirectoryInput>(),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = PlanMcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| PlanMcpError::UnknownTool(s.to_string()))
    }
}

fn schema_object<T: JsonSchema>() -> JsonObject {
    schemars::schema_for!(T)
        .as_object()
        .cloned()
        .unwrap_or_default()
}

/// A registered tool: name, description, and input shape.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            name: kind.name(),
            description: kind.description(),
            input_schema: Arc::new(kind.input_schema()),
        }
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, self.input_schema.clone())
    }

    /// Names of the fields a call must supply.
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .map(|fields| fields.iter().filter_map(|f| f.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Registry holding every [`ToolKind`].
    pub fn new() -> Result<Self, PlanMcpError> {
        let mut registry = Self::default();
        for kind in ToolKind::ALL {
            registry.register(ToolDescriptor::new(kind))?;
        }
        Ok(registry)
    }

    /// Add a descriptor. Names must stay unique.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), PlanMcpError> {
        if self.descriptors.iter().any(|d| d.name == descriptor.name) {
            return Err(PlanMcpError::Configuration(format!(
                "tool '{}' is already registered",
                descriptor.name
            )));
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&ToolDescriptor, PlanMcpError> {
        self.descriptors
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| PlanMcpError::UnknownTool(name.to_string()))
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.descriptors.iter().map(ToolDescriptor::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Absolute filesystem path: file content or aggregated directory.
    File,
}

/// One URI resolution rule, matched by scheme prefix.
#[derive(Debug, Clone)]
pub struct ResourceRule {
    pub kind: ResourceKind,
    pub prefix: &'static str,
    pub uri_template: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    rules: Vec<ResourceRule>,
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self {
            rules: vec![ResourceRule {
                kind: ResourceKind::File,
                prefix: "file://",
                uri_template: "file://{path}",
                name: "File or Directory",
                description: "Text content of a file, or a directory listing followed by the \
                              content of every source file in it",
                mime_type: "text/plain",
            }],
        }
    }
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `uri` to its rule and the remainder after the scheme prefix.
    pub fn resolve<'u>(&self, uri: &'u str) -> Result<(&ResourceRule, &'u str), PlanMcpError> {
        self.rules
            .iter()
            .find_map(|rule| uri.strip_prefix(rule.prefix).map(|rest| (rule, rest)))
            .ok_or_else(|| PlanMcpError::ResourceNotFound {
                path: uri.to_string(),
            })
    }

    pub fn rules(&self) -> &[ResourceRule] {
        &self.rules
    }

    pub fn templates(&self) -> Vec<ResourceTemplate> {
        self.rules
            .iter()
            .map(|rule| {
                Annotated::new(
                    RawResourceTemplate {
                        uri_template: rule.uri_template.to_string(),
                        name: rule.name.to_string(),
                        title: None,
                        description: Some(rule.description.to_string()),
                        mime_type: Some(rule.mime_type.to_string()),
                        icons: None,
                    },
                    None,
                )
            })
            .collect()
    }
}
