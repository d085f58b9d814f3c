//! Project Tools
//!
//! Tools for listing, reading, creating and deleting Harbor projects.

use serde::Deserialize;
use serde_json::Value;

use super::{json_result, parse_params};
use crate::harbor::models::{CreateProjectRequest, PageQuery, ProjectQuery};
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{HarborTool, McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register project tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(list_projects_tool());
    registry.register_tool(get_project_tool());
    registry.register_tool(create_project_tool());
    registry.register_tool(delete_project_tool());
}

/// Parameters naming a single project
#[derive(Debug, Deserialize)]
struct ProjectParams {
    project_name: String,
}

fn project_name_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "project_name": {
                "type": "string",
                "description": "Project name or numeric ID"
            }
        },
        "required": ["project_name"]
    })
}

// ============================================================================
// list_projects
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListProjectsParams {
    name: Option<String>,
    public: Option<bool>,
    page: Option<u32>,
    page_size: Option<u32>,
}

fn list_projects_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::ListProjects)
        .description("List projects in the Harbor registry")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Only return projects whose name matches"
                },
                "public": {
                    "type": "boolean",
                    "description": "Only return public (true) or private (false) projects"
                },
                "page": {
                    "type": "integer",
                    "description": "Page number, starting at 1",
                    "minimum": 1
                },
                "page_size": {
                    "type": "integer",
                    "description": "Results per page (default 10)",
                    "minimum": 1,
                    "maximum": 100
                }
            }
        }))
        .build(list_projects_handler)
}

async fn list_projects_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListProjectsParams = parse_params(params)?;
    let query = ProjectQuery {
        name: params.name,
        public: params.public,
        page: PageQuery::new(params.page, params.page_size),
    };
    let projects = ctx.harbor.list_projects(&query).await?;
    json_result(&projects)
}

// ============================================================================
// get_project
// ============================================================================

fn get_project_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::GetProject)
        .description("Get details of a Harbor project")
        .input_schema(project_name_schema())
        .build(get_project_handler)
}

async fn get_project_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ProjectParams = parse_params(params)?;
    let project = ctx.harbor.get_project(&params.project_name).await?;
    json_result(&project)
}

// ============================================================================
// create_project
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateProjectParams {
    project_name: String,
    #[serde(default)]
    public: bool,
    storage_limit: Option<i64>,
}

fn create_project_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::CreateProject)
        .description("Create a new Harbor project")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "project_name": {
                    "type": "string",
                    "description": "Name of the project to create"
                },
                "public": {
                    "type": "boolean",
                    "description": "Whether the project is publicly readable (default false)"
                },
                "storage_limit": {
                    "type": "integer",
                    "description": "Storage quota in bytes, -1 for unlimited"
                }
            },
            "required": ["project_name"]
        }))
        .build(create_project_handler)
}

async fn create_project_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateProjectParams = parse_params(params)?;
    if params.project_name.trim().is_empty() {
        return Err(McpError::InvalidParams("project_name must not be empty".into()).into());
    }

    let mut request = CreateProjectRequest::new(params.project_name.clone(), params.public);
    request.storage_limit = params.storage_limit;
    ctx.harbor.create_project(&request).await?;

    Ok(ToolsCallResult::text(format!(
        "Project '{}' created",
        params.project_name
    )))
}

// ============================================================================
// delete_project
// ============================================================================

fn delete_project_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::DeleteProject)
        .description("Delete a Harbor project. The project must not contain repositories")
        .input_schema(project_name_schema())
        .build(delete_project_handler)
}

async fn delete_project_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ProjectParams = parse_params(params)?;
    ctx.harbor.delete_project(&params.project_name).await?;
    Ok(ToolsCallResult::text(format!(
        "Project '{}' deleted",
        params.project_name
    )))
}
