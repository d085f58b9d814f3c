use axum::extract::FromRef;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::sessions::SessionRegistry;
use super::ServerConfig;
use crate::mcp::McpState;

pub type GuardedMcpState = Arc<McpState>;
pub type GuardedSessionRegistry = Arc<SessionRegistry>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub mcp_state: GuardedMcpState,
    pub sessions: GuardedSessionRegistry,
    /// Cancelled when the server shuts down, ends every open event stream.
    pub shutdown: CancellationToken,
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedMcpState {
    fn from_ref(input: &ServerState) -> Self {
        input.mcp_state.clone()
    }
}

impl FromRef<ServerState> for GuardedSessionRegistry {
    fn from_ref(input: &ServerState) -> Self {
        input.sessions.clone()
    }
}
