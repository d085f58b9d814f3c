//! SSE session registry.
//!
//! Tracks every open `GET /sse` stream by its session id so that messages
//! posted to `/messages?sessionId=...` reach the right stream, and only that
//! one. Entries are added when a stream opens and removed when it closes.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::mcp::McpResponse;

/// Outgoing messages buffered per session before senders wait.
const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Information about an active SSE session.
struct SessionEntry {
    sender: mpsc::Sender<McpResponse>,
}

/// Error type for send operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SendError {
    /// No session with this id.
    NotConnected,
    /// The session's stream is gone.
    Disconnected,
}

/// Manages all active SSE sessions.
pub struct SessionRegistry {
    /// session_id -> entry
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new session under a freshly generated id.
    ///
    /// Returns the id and the receiver the caller forwards to the event stream.
    pub async fn register(&self) -> (String, mpsc::Receiver<McpResponse>) {
        let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);

        let mut sessions = self.sessions.write().await;
        let mut session_id = Uuid::new_v4().to_string();
        while sessions.contains_key(&session_id) {
            session_id = Uuid::new_v4().to_string();
        }
        sessions.insert(session_id.clone(), SessionEntry { sender: tx });

        (session_id, rx)
    }

    /// Unregister a session (called on disconnect).
    ///
    /// Returns false if the session was already gone.
    pub async fn unregister(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Whether the session exists and its stream is still open.
    ///
    /// A session whose stream closed but was not cleaned up yet is removed here.
    pub async fn is_live(&self, session_id: &str) -> bool {
        let closed = {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return false,
                Some(entry) => entry.sender.is_closed(),
            }
        };

        if closed {
            debug!("Session {} stream already closed, removing", session_id);
            self.unregister(session_id).await;
        }
        !closed
    }

    /// Send a message to one session's stream.
    pub async fn send(&self, session_id: &str, message: McpResponse) -> Result<(), SendError> {
        // Clone the sender so a slow stream doesn't hold the lock
        let sender = {
            let sessions = self.sessions.read().await;
            sessions
                .get(session_id)
                .map(|entry| entry.sender.clone())
                .ok_or(SendError::NotConnected)?
        };

        sender
            .send(message)
            .await
            .map_err(|_| SendError::Disconnected)
    }

    /// Check if a session is registered.
    pub async fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    /// Get the number of registered sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
