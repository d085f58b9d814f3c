//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{SseClient, StubHarbor, TestServer};
//!
//! #[tokio::test]
//! async fn test_ping() {
//!     let server = TestServer::spawn(StubHarbor::new()).await;
//!     let mut session = SseClient::connect(&server.base_url).await;
//!
//!     let response = session.request(1, "ping", serde_json::json!({})).await;
//!     assert_eq!(response["result"], serde_json::json!({}));
//! }
//! ```

mod constants;
mod harbor_stub;
mod server;
mod sse;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use harbor_stub::{StubBehavior, StubHarbor};
#[allow(unused_imports)]
pub use server::TestServer;
#[allow(unused_imports)]
pub use sse::SseClient;
