//! Tool call dispatch.
//!
//! Resolves a tool name against the registry, runs its handler and folds
//! whatever goes wrong into the protocol error model: protocol errors keep
//! their classification, every other failure becomes an internal error
//! carrying the original message.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::context::ToolContext;
use super::protocol::{McpError, ToolDefinition, ToolsCallResult};
use super::registry::McpRegistry;
use crate::harbor::HarborApi;

/// Routes `tools/call` requests to their handlers.
#[derive(Clone)]
pub struct McpDispatcher {
    registry: Arc<McpRegistry>,
    context: ToolContext,
}

impl McpDispatcher {
    pub fn new(registry: Arc<McpRegistry>, harbor: Arc<dyn HarborApi>) -> Self {
        Self {
            registry,
            context: ToolContext::new(harbor),
        }
    }

    /// The full tool catalog, identical for every caller.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.registry.list_tools()
    }

    /// Run a tool by name.
    ///
    /// Arguments are handed to the tool as-is; decoding them is the tool's job.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolsCallResult, McpError> {
        let tool = self
            .registry
            .get_tool(name)
            .ok_or_else(|| McpError::MethodNotFound(format!("Unknown tool: {}", name)))?;

        debug!("Calling tool {}", name);
        let result = (tool.handler)(self.context.clone(), arguments).await;

        result.map_err(|err| {
            let err = classify_error(err);
            warn!("Tool {} failed: {}", name, err);
            err
        })
    }
}

/// Protocol errors pass through unchanged, anything else is an internal error.
pub fn classify_error(err: anyhow::Error) -> McpError {
    match err.downcast::<McpError>() {
        Ok(protocol_error) => protocol_error,
        Err(other) => McpError::InternalError(format!("{:#}", other)),
    }
}
