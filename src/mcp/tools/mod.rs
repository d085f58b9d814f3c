//! MCP Tools
//!
//! Tool implementations for projects, repositories, artifacts and system
//! information.

pub mod artifacts;
pub mod projects;
pub mod repositories;
pub mod system;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::protocol::{McpError, ToolsCallResult};
use super::registry::{McpRegistry, ToolResult};

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut McpRegistry) {
    projects::register_tools(registry);
    repositories::register_tools(registry);
    artifacts::register_tools(registry);
    system::register_tools(registry);
}

/// Decode tool arguments, reporting failures as invalid params.
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, McpError> {
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}

/// Wrap a registry result as pretty-printed JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> ToolResult {
    Ok(ToolsCallResult::json(value)?)
}
