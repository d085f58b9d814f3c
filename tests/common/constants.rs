//! Test constants
#![allow(dead_code)]

pub const PROJECT_NAME: &str = "library";
pub const REPOSITORY_NAME: &str = "team/nginx";
pub const ARTIFACT_DIGEST: &str =
    "sha256:4b1c2f6f3f2c1a6b9e0d7c8a5b4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c7d6e";
pub const TAG_NAME: &str = "latest";
pub const HARBOR_VERSION: &str = "v2.10.0";

/// Upstream failure message used by failing stubs.
pub const UPSTREAM_FAILURE: &str = "boom";

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Upper bound for any single SSE event to arrive.
pub const EVENT_TIMEOUT_MS: u64 = 5000;
