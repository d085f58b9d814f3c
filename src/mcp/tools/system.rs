//! System Tools
//!
//! Registry-wide search, health and version information.

use serde::Deserialize;
use serde_json::Value;

use super::{json_result, parse_params};
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::McpError;
use crate::mcp::registry::{HarborTool, McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register system tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(search_tool());
    registry.register_tool(get_health_tool());
    registry.register_tool(get_system_info_tool());
}

// ============================================================================
// search
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

fn search_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::Search)
        .description("Search projects and repositories by name")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search keyword"
                }
            },
            "required": ["query"]
        }))
        .build(search_handler)
}

async fn search_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SearchParams = parse_params(params)?;
    if params.query.trim().is_empty() {
        return Err(McpError::InvalidParams("query must not be empty".into()).into());
    }
    let result = ctx.harbor.search(&params.query).await?;
    json_result(&result)
}

// ============================================================================
// get_health / get_system_info
// ============================================================================

fn get_health_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::GetHealth)
        .description("Get the health status of Harbor and each of its components")
        .build(get_health_handler)
}

async fn get_health_handler(ctx: ToolContext, _params: Value) -> ToolResult {
    let health = ctx.harbor.health().await?;
    json_result(&health)
}

fn get_system_info_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::GetSystemInfo)
        .description("Get Harbor version and general system settings")
        .build(get_system_info_handler)
}

async fn get_system_info_handler(ctx: ToolContext, _params: Value) -> ToolResult {
    let info = ctx.harbor.system_info().await?;
    json_result(&info)
}
