//! Data models for the Harbor v2.0 REST API.
//!
//! Only the fields the tools surface are modeled; Harbor sends more.
//! Timestamps are kept as the RFC 3339 strings Harbor returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size for list operations, matching Harbor's own default.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Harbor refuses page sizes above this.
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// Projects
// =============================================================================

/// Project metadata. Harbor encodes every value as a string ("true"/"false").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_vul: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub repo_count: Option<i64>,
    #[serde(default)]
    pub registry_id: Option<i64>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub metadata: Option<ProjectMetadata>,
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub metadata: ProjectMetadata,
    /// Quota in bytes, -1 for unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_limit: Option<i64>,
}

impl CreateProjectRequest {
    pub fn new(project_name: impl Into<String>, public: bool) -> Self {
        Self {
            project_name: project_name.into(),
            metadata: ProjectMetadata {
                public: Some(public.to_string()),
                ..Default::default()
            },
            storage_limit: None,
        }
    }
}

/// Filters for `GET /projects`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectQuery {
    pub name: Option<String>,
    pub public: Option<bool>,
    pub page: PageQuery,
}

// =============================================================================
// Repositories, artifacts, tags
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub artifact_count: Option<i64>,
    #[serde(default)]
    pub pull_count: Option<i64>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub repository_id: Option<i64>,
    #[serde(default)]
    pub artifact_id: Option<i64>,
    #[serde(default)]
    pub push_time: Option<String>,
    #[serde(default)]
    pub pull_time: Option<String>,
    #[serde(default)]
    pub immutable: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    pub id: i64,
    pub digest: String,
    #[serde(default, rename = "type")]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub manifest_media_type: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub repository_id: Option<i64>,
    #[serde(default)]
    pub push_time: Option<String>,
    #[serde(default)]
    pub pull_time: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    /// Type-specific attributes (architecture, os, config for images).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_attrs: Option<Value>,
}

/// Filters for `GET .../artifacts`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactQuery {
    pub with_tag: bool,
    pub page: PageQuery,
}

/// Body of `POST .../tags`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateTagRequest {
    pub name: String,
}

// =============================================================================
// Search, health, system info
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRepository {
    pub repository_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_public: Option<bool>,
    #[serde(default)]
    pub artifact_count: Option<i64>,
    #[serde(default)]
    pub pull_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(default)]
    pub project: Vec<Project>,
    #[serde(default)]
    pub repository: Vec<SearchRepository>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallHealth {
    pub status: String,
    #[serde(default)]
    pub components: Vec<ComponentHealth>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemInfo {
    #[serde(default)]
    pub harbor_version: Option<String>,
    #[serde(default)]
    pub auth_mode: Option<String>,
    #[serde(default)]
    pub registry_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub project_creation_restriction: Option<String>,
    #[serde(default)]
    pub self_registration: Option<bool>,
    #[serde(default)]
    pub has_ca_root: Option<bool>,
    #[serde(default)]
    pub read_only: Option<bool>,
}

// =============================================================================
// Paging and errors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl PageQuery {
    /// Builds a page query, clamping to what Harbor accepts.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Error payload Harbor returns on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarborErrors {
    #[serde(default)]
    pub errors: Vec<HarborErrorItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarborErrorItem {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl HarborErrors {
    /// Joins all messages as "CODE: message; CODE: message".
    pub fn summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| match (e.code.is_empty(), e.message.is_empty()) {
                (true, _) => e.message.clone(),
                (false, true) => e.code.clone(),
                (false, false) => format!("{}: {}", e.code, e.message),
            })
            .collect();
        Some(parts.join("; "))
    }
}
