//! Minimal SSE client for driving the HTTP transport
#![allow(dead_code)]

use super::constants::*;
use futures::{Stream, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::pin::Pin;
use std::time::Duration;

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>;

/// One parsed server-sent event
#[derive(Debug, Clone, PartialEq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

/// An open `GET /sse` session
pub struct SseClient {
    pub base_url: String,
    /// Path announced by the `endpoint` event, e.g. "/messages?sessionId=..."
    pub endpoint: String,
    pub session_id: String,
    client: Client,
    stream: ByteStream,
    buffer: String,
}

impl SseClient {
    /// Opens a session and consumes its `endpoint` event
    pub async fn connect(base_url: &str) -> Self {
        let client = Client::new();
        let response = client
            .get(format!("{}/sse", base_url))
            .header("accept", "text/event-stream")
            .send()
            .await
            .expect("Failed to open SSE stream");
        assert_eq!(response.status(), StatusCode::OK);

        let stream: ByteStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec())),
        );

        let mut sse = Self {
            base_url: base_url.to_string(),
            endpoint: String::new(),
            session_id: String::new(),
            client,
            stream,
            buffer: String::new(),
        };

        let endpoint = sse.next_event().await.expect("Stream ended before endpoint");
        assert_eq!(endpoint.event, "endpoint");
        sse.session_id = endpoint
            .data
            .split("sessionId=")
            .nth(1)
            .expect("Endpoint without session id")
            .to_string();
        sse.endpoint = endpoint.data;
        sse
    }

    /// Next named event, `None` once the server ended the stream
    pub async fn next_event(&mut self) -> Option<SseEvent> {
        tokio::time::timeout(Duration::from_millis(EVENT_TIMEOUT_MS), self.read_event())
            .await
            .expect("Timed out waiting for SSE event")
    }

    async fn read_event(&mut self) -> Option<SseEvent> {
        loop {
            while let Some(end) = self.buffer.find("\n\n") {
                let raw: String = self.buffer.drain(..end + 2).collect();
                if let Some(event) = parse_event(&raw) {
                    return Some(event);
                }
            }

            match self.stream.next().await {
                Some(Ok(bytes)) => self.buffer.push_str(&String::from_utf8_lossy(&bytes)),
                Some(Err(_)) | None => return None,
            }
        }
    }

    /// Posts a raw body to this session's endpoint
    pub async fn post_raw(&self, body: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, self.endpoint))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to post message")
    }

    /// Sends a request and returns the JSON-RPC response from the stream
    pub async fn request(&mut self, id: i64, method: &str, params: Value) -> Value {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = self.post_raw(&body.to_string()).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        self.next_message().await
    }

    /// Next `message` event, decoded
    pub async fn next_message(&mut self) -> Value {
        let event = self.next_event().await.expect("Stream ended");
        assert_eq!(event.event, "message");
        serde_json::from_str(&event.data).expect("Message is not JSON")
    }
}

/// Parses one event block, `None` for comment-only blocks such as keep-alives
fn parse_event(raw: &str) -> Option<SseEvent> {
    let mut event = String::from("message");
    let mut data: Vec<&str> = Vec::new();
    let mut named = false;

    for line in raw.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            event = value.trim_start().to_string();
            named = true;
        } else if let Some(value) = line.strip_prefix("data:") {
            data.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    if !named && data.is_empty() {
        return None;
    }
    Some(SseEvent {
        event,
        data: data.join("\n"),
    })
}
