//! MCP Message Handler
//!
//! Transport-independent JSON-RPC handling: decodes one message, routes it by
//! method and produces the response, if any. Both the stdio and the SSE
//! transports feed their messages through [`handle_message`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::dispatcher::McpDispatcher;
use super::protocol::{
    methods, InitializeParams, InitializeResult, McpError, McpRequest, McpResponse, PingResult,
    ServerCapabilities, ServerInfo, ToolsCallParams, ToolsCapability, ToolsListResult,
    JSONRPC_VERSION, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use super::registry::McpRegistry;
use crate::harbor::HarborApi;

/// State shared across MCP connections
pub struct McpState {
    pub dispatcher: McpDispatcher,
}

/// Handle a single raw MCP message
pub async fn handle_message(text: &str, state: &McpState) -> Option<McpResponse> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            return Some(McpResponse::error(
                None,
                McpError::ParseError(e.to_string()),
            ));
        }
    };
    handle_value(value, state).await
}

/// Handle a message that is already valid JSON
pub async fn handle_value(value: Value, state: &McpState) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_value(value) {
        Ok(req) => req,
        Err(e) => {
            return Some(McpResponse::error(
                None,
                McpError::InvalidRequest(e.to_string()),
            ));
        }
    };
    handle_request(request, state).await
}

/// Route a decoded request by method
pub async fn handle_request(request: McpRequest, state: &McpState) -> Option<McpResponse> {
    if request.is_notification() {
        // Notifications never get a response, not even an error
        debug!("Received notification {}", request.method);
        return None;
    }

    if request.jsonrpc != JSONRPC_VERSION {
        return Some(McpResponse::error(
            request.id,
            McpError::InvalidRequest(format!("Unsupported jsonrpc version {}", request.jsonrpc)),
        ));
    }

    let result = match request.method.as_str() {
        methods::INITIALIZE => handle_initialize(&request),
        methods::PING => handle_ping(),
        methods::TOOLS_LIST => handle_tools_list(state),
        methods::TOOLS_CALL => handle_tools_call(&request, state).await,
        methods::INITIALIZED => {
            Err(McpError::InvalidRequest(format!("{} is a notification", methods::INITIALIZED)))
        }
        other => Err(McpError::MethodNotFound(other.to_string())),
    };

    Some(match result {
        Ok(value) => McpResponse::success(request.id, value),
        Err(error) => McpResponse::error(request.id, error),
    })
}

fn handle_initialize(request: &McpRequest) -> Result<Value, McpError> {
    let params: Option<InitializeParams> = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if let Some(params) = params {
        info!(
            "MCP client {} {} connected (protocol {})",
            params.client_info.name, params.client_info.version, params.protocol_version
        );
    }

    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability { list_changed: None },
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: super::protocol::server_version(),
        },
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

fn handle_ping() -> Result<Value, McpError> {
    serde_json::to_value(PingResult {}).map_err(|e| McpError::InternalError(e.to_string()))
}

fn handle_tools_list(state: &McpState) -> Result<Value, McpError> {
    let result = ToolsListResult {
        tools: state.dispatcher.list_tools(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_call(request: &McpRequest, state: &McpState) -> Result<Value, McpError> {
    let params: ToolsCallParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let arguments = params.arguments.unwrap_or(serde_json::json!({}));
    let result = state.dispatcher.call_tool(&params.name, arguments).await?;

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

/// Create the MCP state with the full tool catalog
pub fn create_mcp_state(harbor: Arc<dyn HarborApi>) -> McpState {
    let registry = McpRegistry::with_all_tools();

    info!("MCP registry initialized with {} tools", registry.tool_count());

    McpState {
        dispatcher: McpDispatcher::new(Arc::new(registry), harbor),
    }
}
