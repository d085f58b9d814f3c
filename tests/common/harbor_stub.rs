//! In-memory stand-in for a Harbor instance
#![allow(dead_code)]

use super::constants::*;
use anyhow::{bail, Result};
use async_trait::async_trait;
use harbor_mcp_server::harbor::models::{
    Artifact, ArtifactQuery, CreateProjectRequest, OverallHealth, PageQuery, Project,
    ProjectQuery, Repository, SearchResult, SystemInfo, Tag,
};
use harbor_mcp_server::harbor::HarborApi;
use harbor_mcp_server::mcp::McpError;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

/// How every registry operation of a [`StubHarbor`] behaves.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Return canned data.
    Succeed,
    /// Fail with a plain error carrying this message.
    Fail(String),
    /// Fail with an already-classified protocol error.
    Reject(McpError),
    /// Sleep before answering with canned data.
    Delay(Duration),
}

/// Records every call and answers from fixed fixtures.
pub struct StubHarbor {
    behavior: StubBehavior,
    calls: Mutex<Vec<String>>,
}

impl StubHarbor {
    pub fn new() -> Self {
        Self::with_behavior(StubBehavior::Succeed)
    }

    pub fn failing() -> Self {
        Self::with_behavior(StubBehavior::Fail(UPSTREAM_FAILURE.to_string()))
    }

    pub fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, formatted as `operation(arg, ...)`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.behavior {
            StubBehavior::Succeed => Ok(()),
            StubBehavior::Fail(message) => bail!("{}", message),
            StubBehavior::Reject(error) => Err(error.clone().into()),
            StubBehavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
        }
    }
}

fn fixture<T: DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

fn project(name: &str) -> Project {
    fixture(json!({
        "project_id": 1,
        "name": name,
        "owner_name": "admin",
        "repo_count": 1,
        "metadata": { "public": "true" }
    }))
}

fn artifact() -> Artifact {
    fixture(json!({
        "id": 7,
        "digest": ARTIFACT_DIGEST,
        "type": "IMAGE",
        "size": 1024,
        "tags": [{ "name": TAG_NAME }]
    }))
}

#[async_trait]
impl HarborApi for StubHarbor {
    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        self.record(format!(
            "list_projects({:?}, {}, {})",
            query.name, query.page.page, query.page.page_size
        ))
        .await?;
        Ok(vec![project(PROJECT_NAME)])
    }

    async fn get_project(&self, project_name: &str) -> Result<Project> {
        self.record(format!("get_project({})", project_name)).await?;
        Ok(project(project_name))
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<()> {
        self.record(format!("create_project({})", request.project_name))
            .await
    }

    async fn delete_project(&self, project_name: &str) -> Result<()> {
        self.record(format!("delete_project({})", project_name)).await
    }

    async fn list_repositories(
        &self,
        project_name: &str,
        filter: Option<String>,
        page: PageQuery,
    ) -> Result<Vec<Repository>> {
        self.record(format!(
            "list_repositories({}, {:?}, {})",
            project_name, filter, page.page
        ))
        .await?;
        Ok(vec![fixture(json!({
            "id": 3,
            "name": format!("{}/{}", project_name, REPOSITORY_NAME),
            "artifact_count": 1
        }))])
    }

    async fn delete_repository(&self, project_name: &str, repository: &str) -> Result<()> {
        self.record(format!("delete_repository({}, {})", project_name, repository))
            .await
    }

    async fn list_artifacts(
        &self,
        project_name: &str,
        repository: &str,
        query: &ArtifactQuery,
    ) -> Result<Vec<Artifact>> {
        self.record(format!(
            "list_artifacts({}, {}, {})",
            project_name, repository, query.with_tag
        ))
        .await?;
        Ok(vec![artifact()])
    }

    async fn get_artifact(
        &self,
        project_name: &str,
        repository: &str,
        reference: &str,
    ) -> Result<Artifact> {
        self.record(format!(
            "get_artifact({}, {}, {})",
            project_name, repository, reference
        ))
        .await?;
        Ok(artifact())
    }

    async fn delete_artifact(
        &self,
        project_name: &str,
        repository: &str,
        reference: &str,
    ) -> Result<()> {
        self.record(format!(
            "delete_artifact({}, {}, {})",
            project_name, repository, reference
        ))
        .await
    }

    async fn list_tags(
        &self,
        project_name: &str,
        repository: &str,
        reference: &str,
        _page: PageQuery,
    ) -> Result<Vec<Tag>> {
        self.record(format!(
            "list_tags({}, {}, {})",
            project_name, repository, reference
        ))
        .await?;
        Ok(vec![fixture(json!({ "name": TAG_NAME }))])
    }

    async fn create_tag(
        &self,
        project_name: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()> {
        self.record(format!(
            "create_tag({}, {}, {}, {})",
            project_name, repository, reference, tag
        ))
        .await
    }

    async fn delete_tag(
        &self,
        project_name: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()> {
        self.record(format!(
            "delete_tag({}, {}, {}, {})",
            project_name, repository, reference, tag
        ))
        .await
    }

    async fn search(&self, query: &str) -> Result<SearchResult> {
        self.record(format!("search({})", query)).await?;
        Ok(SearchResult {
            project: vec![project(PROJECT_NAME)],
            repository: Vec::new(),
        })
    }

    async fn health(&self) -> Result<OverallHealth> {
        self.record("health()".to_string()).await?;
        Ok(fixture(json!({
            "status": "healthy",
            "components": [{ "name": "core", "status": "healthy" }]
        })))
    }

    async fn system_info(&self) -> Result<SystemInfo> {
        self.record("system_info()".to_string()).await?;
        Ok(SystemInfo {
            harbor_version: Some(HARBOR_VERSION.to_string()),
            ..Default::default()
        })
    }
}
