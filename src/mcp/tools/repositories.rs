//! Repository Tools

use serde::Deserialize;
use serde_json::Value;

use super::{json_result, parse_params};
use crate::harbor::models::PageQuery;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::ToolsCallResult;
use crate::mcp::registry::{HarborTool, McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register repository tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(list_repositories_tool());
    registry.register_tool(delete_repository_tool());
}

// ============================================================================
// list_repositories
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListRepositoriesParams {
    project_name: String,
    name: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

fn list_repositories_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::ListRepositories)
        .description("List repositories in a Harbor project")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "project_name": {
                    "type": "string",
                    "description": "Project name"
                },
                "name": {
                    "type": "string",
                    "description": "Fuzzy filter on repository name"
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
            },
            "required": ["project_name"]
        }))
        .build(list_repositories_handler)
}

async fn list_repositories_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListRepositoriesParams = parse_params(params)?;
    let repositories = ctx
        .harbor
        .list_repositories(
            &params.project_name,
            params.name,
            PageQuery::new(params.page, params.page_size),
        )
        .await?;
    json_result(&repositories)
}

// ============================================================================
// delete_repository
// ============================================================================

#[derive(Debug, Deserialize)]
struct DeleteRepositoryParams {
    project_name: String,
    repository_name: String,
}

fn delete_repository_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::DeleteRepository)
        .description("Delete a repository and all of its artifacts")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "project_name": {
                    "type": "string",
                    "description": "Project name"
                },
                "repository_name": {
                    "type": "string",
                    "description": "Repository name without the project prefix, e.g. 'nginx' or 'team/app'"
                }
            },
            "required": ["project_name", "repository_name"]
        }))
        .build(delete_repository_handler)
}

async fn delete_repository_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: DeleteRepositoryParams = parse_params(params)?;
    ctx.harbor
        .delete_repository(&params.project_name, &params.repository_name)
        .await?;
    Ok(ToolsCallResult::text(format!(
        "Repository '{}/{}' deleted",
        params.project_name, params.repository_name
    )))
}
