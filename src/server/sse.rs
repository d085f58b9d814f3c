//! MCP over HTTP + Server-Sent Events.
//!
//! `GET /sse` opens a session: the first event (`endpoint`) tells the client
//! where to post, every later event (`message`) carries one JSON-RPC response.
//! `POST /messages?sessionId=<id>` delivers one client message to a session;
//! the POST itself is only acknowledged and the response travels on the
//! session's stream.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::{future, stream, Stream, StreamExt};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::state::ServerState;
use crate::mcp::handler::handle_value;
use crate::mcp::McpResponse;

pub const SSE_PATH: &str = "/sse";
pub const MESSAGES_PATH: &str = "/messages";

/// Body of the 400 returned when a post names no live session.
pub const NO_SESSION_MESSAGE: &str = "No SSE connection found for this session";

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Opens an event stream and registers it as a new session.
pub async fn open_stream(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let sessions = state.sessions.clone();
    let (session_id, outgoing_rx) = sessions.register().await;
    info!("SSE session {} opened", session_id);

    // Fires once, when the stream below is dropped for whatever reason
    let closed = CancellationToken::new();
    let close_guard = closed.clone().drop_guard();
    {
        let session_id = session_id.clone();
        tokio::spawn(async move {
            closed.cancelled().await;
            sessions.unregister(&session_id).await;
            info!("SSE session {} closed", session_id);
        });
    }

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?sessionId={}", MESSAGES_PATH, session_id));

    let messages = stream::unfold(
        (outgoing_rx, close_guard),
        |(mut outgoing_rx, close_guard)| async move {
            let response = outgoing_rx.recv().await?;
            Some((message_event(&response), (outgoing_rx, close_guard)))
        },
    );

    let events = stream::once(future::ready(endpoint))
        .chain(messages)
        .take_until(state.shutdown.clone().cancelled_owned())
        .map(Ok::<Event, Infallible>);

    Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}

fn message_event(response: &McpResponse) -> Event {
    match serde_json::to_string(response) {
        Ok(json) => Event::default().event("message").data(json),
        Err(e) => {
            error!("Failed to serialize MCP response: {}", e);
            Event::default().comment("dropped unserializable message")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    session_id: Option<String>,
}

/// Accepts one client message for an open session.
pub async fn post_message(
    State(state): State<ServerState>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(session_id) = query.session_id else {
        debug!("Rejecting message without session id");
        return (StatusCode::BAD_REQUEST, NO_SESSION_MESSAGE).into_response();
    };
    if !state.sessions.is_live(&session_id).await {
        debug!("Rejecting message for unknown session {}", session_id);
        return (StatusCode::BAD_REQUEST, NO_SESSION_MESSAGE).into_response();
    }

    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid message: {}", e)).into_response();
        }
    };

    let mcp_state = state.mcp_state.clone();
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let Some(response) = handle_value(message, &mcp_state).await else {
            return;
        };
        if let Err(e) = sessions.send(&session_id, response).await {
            debug!(
                "Dropping response for session {} ({:?})",
                session_id, e
            );
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
