//! MCP (Model Context Protocol) Server
//!
//! Exposes the Harbor registry as MCP tools.
//!
//! ## Architecture
//!
//! - Catalog: a fixed set of tools, one per registry operation, registered once
//! - Dispatch: tool name -> handler, errors folded into JSON-RPC error codes
//! - Transports: newline-delimited stdio, or HTTP + SSE (see `crate::server`)

pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod stdio;
pub mod tools;

pub use dispatcher::McpDispatcher;
pub use handler::{create_mcp_state, handle_message, McpState};
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::{HarborTool, McpRegistry};
