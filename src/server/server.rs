//! HTTP + SSE server wiring.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::sessions::SessionRegistry;
use super::sse::{open_stream, post_message, MESSAGES_PATH, SSE_PATH};
use super::state::ServerState;
use super::{log_requests, ServerConfig};
use crate::mcp::McpState;

pub fn make_app(
    config: ServerConfig,
    mcp_state: Arc<McpState>,
    sessions: Arc<SessionRegistry>,
    shutdown: CancellationToken,
) -> Router {
    let state = ServerState {
        config,
        mcp_state,
        sessions,
        shutdown,
    };

    Router::new()
        .route(SSE_PATH, get(open_stream))
        .route(MESSAGES_PATH, post(post_message))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

/// Serve on an already bound listener until `signal` resolves.
///
/// Open event streams are ended when the signal fires so that in-flight
/// connections can drain.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    mcp_state: Arc<McpState>,
    signal: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown = CancellationToken::new();
    let app = make_app(
        config,
        mcp_state,
        Arc::new(SessionRegistry::new()),
        shutdown.clone(),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            info!("Shutting down HTTP server");
            shutdown.cancel();
        })
        .await
        .context("HTTP server failed")
}

/// Bind `0.0.0.0:<port>` and serve until Ctrl-C.
pub async fn run_server(config: ServerConfig, mcp_state: Arc<McpState>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("MCP SSE endpoint listening on http://{}{}", addr, SSE_PATH);

    serve(listener, config, mcp_state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            // Without a signal handler the server runs until killed
            std::future::pending::<()>().await;
        }
    })
    .await
}
