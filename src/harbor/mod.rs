//! Harbor registry client.
//!
//! [`HarborApi`] is the seam between the MCP tools and the registry: the tools
//! only ever see the trait, [`HarborClient`] implements it over HTTP.

mod client;
pub mod models;

pub use client::{HarborClient, HarborClientConfig, API_PREFIX};

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

use models::{
    Artifact, ArtifactQuery, CreateProjectRequest, OverallHealth, PageQuery, Project,
    ProjectQuery, Repository, SearchResult, SystemInfo, Tag,
};

/// Static credentials used for every request of the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic auth with the configured username.
    Password(String),
    /// Bearer token.
    Token(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password(_) => write!(f, "Password(***)"),
            Credentials::Token(_) => write!(f, "Token(***)"),
        }
    }
}

/// Registry operations exposed as MCP tools.
///
/// `project` accepts a project name or numeric id, `reference` a tag or a
/// digest, as Harbor does.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait HarborApi: Send + Sync {
    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>>;

    async fn get_project(&self, project: &str) -> Result<Project>;

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<()>;

    async fn delete_project(&self, project: &str) -> Result<()>;

    async fn list_repositories(
        &self,
        project: &str,
        filter: Option<String>,
        page: PageQuery,
    ) -> Result<Vec<Repository>>;

    async fn delete_repository(&self, project: &str, repository: &str) -> Result<()>;

    async fn list_artifacts(
        &self,
        project: &str,
        repository: &str,
        query: &ArtifactQuery,
    ) -> Result<Vec<Artifact>>;

    async fn get_artifact(&self, project: &str, repository: &str, reference: &str)
        -> Result<Artifact>;

    async fn delete_artifact(&self, project: &str, repository: &str, reference: &str)
        -> Result<()>;

    async fn list_tags(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        page: PageQuery,
    ) -> Result<Vec<Tag>>;

    async fn create_tag(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()>;

    async fn delete_tag(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()>;

    async fn search(&self, query: &str) -> Result<SearchResult>;

    async fn health(&self) -> Result<OverallHealth>;

    async fn system_info(&self) -> Result<SystemInfo>;
}
