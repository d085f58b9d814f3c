//! MCP Tool Execution Context
//!
//! Provides access to the registry client for tool implementations.

use std::sync::Arc;

use crate::harbor::HarborApi;

/// Context provided to tool handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Harbor registry the tools operate on
    pub harbor: Arc<dyn HarborApi>,
}

impl ToolContext {
    pub fn new(harbor: Arc<dyn HarborApi>) -> Self {
        Self { harbor }
    }
}
