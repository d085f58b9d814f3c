//! MCP Tool Registry
//!
//! The tool catalog. Every tool the server can run is a [`HarborTool`]
//! variant; the registry pairs each variant with its description, input
//! schema and handler. It is filled once at startup and only read afterwards.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::context::ToolContext;
use super::protocol::{ToolDefinition, ToolsCallResult};

// ============================================================================
// Tool Names
// ============================================================================

/// Every tool exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarborTool {
    ListProjects,
    GetProject,
    CreateProject,
    DeleteProject,
    ListRepositories,
    DeleteRepository,
    ListArtifacts,
    GetArtifact,
    DeleteArtifact,
    ListTags,
    CreateTag,
    DeleteTag,
    Search,
    GetHealth,
    GetSystemInfo,
}

impl HarborTool {
    pub const ALL: [HarborTool; 15] = [
        HarborTool::ListProjects,
        HarborTool::GetProject,
        HarborTool::CreateProject,
        HarborTool::DeleteProject,
        HarborTool::ListRepositories,
        HarborTool::DeleteRepository,
        HarborTool::ListArtifacts,
        HarborTool::GetArtifact,
        HarborTool::DeleteArtifact,
        HarborTool::ListTags,
        HarborTool::CreateTag,
        HarborTool::DeleteTag,
        HarborTool::Search,
        HarborTool::GetHealth,
        HarborTool::GetSystemInfo,
    ];

    /// Wire name used in `tools/list` and `tools/call`.
    pub fn name(self) -> &'static str {
        match self {
            HarborTool::ListProjects => "list_projects",
            HarborTool::GetProject => "get_project",
            HarborTool::CreateProject => "create_project",
            HarborTool::DeleteProject => "delete_project",
            HarborTool::ListRepositories => "list_repositories",
            HarborTool::DeleteRepository => "delete_repository",
            HarborTool::ListArtifacts => "list_artifacts",
            HarborTool::GetArtifact => "get_artifact",
            HarborTool::DeleteArtifact => "delete_artifact",
            HarborTool::ListTags => "list_tags",
            HarborTool::CreateTag => "create_tag",
            HarborTool::DeleteTag => "delete_tag",
            HarborTool::Search => "search",
            HarborTool::GetHealth => "get_health",
            HarborTool::GetSystemInfo => "get_system_info",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

// ============================================================================
// Tool Types
// ============================================================================

/// Result type for tool execution.
///
/// Handlers raise [`super::protocol::McpError`] through `anyhow` when the
/// failure is a protocol error (bad arguments); anything else is upstream.
pub type ToolResult = anyhow::Result<ToolsCallResult>;

/// Boxed future for async tool execution
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool handler function type
pub type ToolHandler = Arc<dyn Fn(ToolContext, Value) -> ToolFuture + Send + Sync>;

/// A registered tool with metadata and handler
pub struct RegisteredTool {
    pub tool: HarborTool,
    pub description: String,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

impl RegisteredTool {
    pub fn name(&self) -> &'static str {
        self.tool.name()
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Registry for MCP tools, kept in registration order.
pub struct McpRegistry {
    tools: Vec<RegisteredTool>,
}

impl McpRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry with the full Harbor tool catalog.
    pub fn with_all_tools() -> Self {
        let mut registry = Self::new();
        super::tools::register_all_tools(&mut registry);
        registry
    }

    /// Register a tool. A second registration of the same tool replaces the first.
    pub fn register_tool(&mut self, tool: RegisteredTool) {
        match self.tools.iter_mut().find(|t| t.tool == tool.tool) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    /// Definitions of every registered tool
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(RegisteredTool::definition).collect()
    }

    /// Get a tool by its wire name
    pub fn get_tool(&self, name: &str) -> Option<&RegisteredTool> {
        let tool = HarborTool::from_name(name)?;
        self.tools.iter().find(|t| t.tool == tool)
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for McpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder helpers
// ============================================================================

/// Builder for registering a tool
pub struct ToolBuilder {
    tool: HarborTool,
    description: String,
    input_schema: Value,
}

impl ToolBuilder {
    pub fn new(tool: HarborTool) -> Self {
        Self {
            tool,
            description: String::new(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredTool
    where
        F: Fn(ToolContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        RegisteredTool {
            tool: self.tool,
            description: self.description,
            input_schema: self.input_schema,
            handler: Arc::new(move |ctx, params| Box::pin(handler(ctx, params))),
        }
    }
}
