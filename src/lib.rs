//! Harbor MCP Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod harbor;
pub mod logging;
pub mod mcp;
pub mod server;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use harbor::{HarborApi, HarborClient};
pub use mcp::{create_mcp_state, McpState};
pub use server::{run_server, RequestsLoggingLevel};
