//! HTTP client for the Harbor v2.0 REST API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::models::{
    Artifact, ArtifactQuery, CreateProjectRequest, CreateTagRequest, HarborErrors, OverallHealth,
    PageQuery, Project, ProjectQuery, Repository, SearchResult, SystemInfo, Tag,
};
use super::{Credentials, HarborApi};

/// Path prefix of the v2.0 API, appended to the configured registry URL.
pub const API_PREFIX: &str = "/api/v2.0";

/// Everything needed to talk to one Harbor instance.
#[derive(Debug, Clone)]
pub struct HarborClientConfig {
    /// Registry URL, e.g. "https://harbor.example.com"
    pub url: String,
    pub username: String,
    pub credentials: Credentials,
    /// Accept self-signed or otherwise invalid TLS certificates.
    pub insecure: bool,
    /// Per-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout_sec: Option<u64>,
}

/// HTTP client for communicating with Harbor.
pub struct HarborClient {
    client: reqwest::Client,
    api_base: String,
    username: String,
    credentials: Credentials,
}

impl HarborClient {
    /// Create a new Harbor client.
    pub fn new(config: HarborClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(config.insecure);
        if let Some(timeout_sec) = config.timeout_sec {
            builder = builder.timeout(Duration::from_secs(timeout_sec));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        // Ensure base url doesn't have trailing slash
        let api_base = format!("{}{}", config.url.trim_end_matches('/'), API_PREFIX);

        Ok(Self {
            client,
            api_base,
            username: config.username,
            credentials: config.credentials,
        })
    }

    /// Base URL of the API, including the `/api/v2.0` prefix.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        debug!("Harbor request: {} {}", method, url);
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        match &self.credentials {
            Credentials::Password(password) => builder.basic_auth(&self.username, Some(password)),
            Credentials::Token(token) => builder.bearer_auth(token),
        }
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to connect to Harbor to {}", action))?;
        check_status(response, action).await
    }

    async fn get_json<T: DeserializeOwned>(&self, builder: RequestBuilder, action: &str) -> Result<T> {
        self.send(builder, action)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse Harbor response to {}", action))
    }
}

/// Turns a non-2xx response into an error carrying Harbor's own messages.
async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<HarborErrors>(&body)
        .ok()
        .and_then(|errors| errors.summary())
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        bail!("Failed to {}: status {}", action, status)
    } else {
        bail!("Failed to {}: status {}: {}", action, status, detail)
    }
}

fn project_path(project: &str) -> String {
    format!("/projects/{}", urlencoding::encode(project))
}

/// Repository names may contain '/', which Harbor expects double-encoded.
fn repository_path(project: &str, repository: &str) -> String {
    let once = urlencoding::encode(repository);
    format!(
        "{}/repositories/{}",
        project_path(project),
        urlencoding::encode(&once)
    )
}

fn artifact_path(project: &str, repository: &str, reference: &str) -> String {
    format!(
        "{}/artifacts/{}",
        repository_path(project, repository),
        urlencoding::encode(reference)
    )
}

fn page_params(page: PageQuery) -> [(&'static str, String); 2] {
    [
        ("page", page.page.to_string()),
        ("page_size", page.page_size.to_string()),
    ]
}

#[async_trait]
impl HarborApi for HarborClient {
    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        let mut builder = self
            .request(Method::GET, "/projects")
            .query(&page_params(query.page));
        if let Some(name) = &query.name {
            builder = builder.query(&[("name", name)]);
        }
        if let Some(public) = query.public {
            builder = builder.query(&[("public", public)]);
        }
        self.get_json(builder, "list projects").await
    }

    async fn get_project(&self, project: &str) -> Result<Project> {
        let builder = self.request(Method::GET, &project_path(project));
        self.get_json(builder, &format!("get project {}", project))
            .await
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<()> {
        let builder = self.request(Method::POST, "/projects").json(request);
        self.send(builder, &format!("create project {}", request.project_name))
            .await?;
        Ok(())
    }

    async fn delete_project(&self, project: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &project_path(project));
        self.send(builder, &format!("delete project {}", project))
            .await?;
        Ok(())
    }

    async fn list_repositories(
        &self,
        project: &str,
        filter: Option<String>,
        page: PageQuery,
    ) -> Result<Vec<Repository>> {
        let path = format!("{}/repositories", project_path(project));
        let mut builder = self.request(Method::GET, &path).query(&page_params(page));
        if let Some(filter) = filter {
            // Harbor's fuzzy match syntax
            builder = builder.query(&[("q", format!("name=~{}", filter))]);
        }
        self.get_json(builder, &format!("list repositories of {}", project))
            .await
    }

    async fn delete_repository(&self, project: &str, repository: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &repository_path(project, repository));
        self.send(
            builder,
            &format!("delete repository {}/{}", project, repository),
        )
        .await?;
        Ok(())
    }

    async fn list_artifacts(
        &self,
        project: &str,
        repository: &str,
        query: &ArtifactQuery,
    ) -> Result<Vec<Artifact>> {
        let path = format!("{}/artifacts", repository_path(project, repository));
        let builder = self
            .request(Method::GET, &path)
            .query(&page_params(query.page))
            .query(&[("with_tag", query.with_tag)]);
        self.get_json(
            builder,
            &format!("list artifacts of {}/{}", project, repository),
        )
        .await
    }

    async fn get_artifact(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
    ) -> Result<Artifact> {
        let builder = self
            .request(Method::GET, &artifact_path(project, repository, reference))
            .query(&[("with_tag", true)]);
        self.get_json(
            builder,
            &format!("get artifact {}/{}@{}", project, repository, reference),
        )
        .await
    }

    async fn delete_artifact(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
    ) -> Result<()> {
        let builder = self.request(
            Method::DELETE,
            &artifact_path(project, repository, reference),
        );
        self.send(
            builder,
            &format!("delete artifact {}/{}@{}", project, repository, reference),
        )
        .await?;
        Ok(())
    }

    async fn list_tags(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        page: PageQuery,
    ) -> Result<Vec<Tag>> {
        let path = format!("{}/tags", artifact_path(project, repository, reference));
        let builder = self.request(Method::GET, &path).query(&page_params(page));
        self.get_json(
            builder,
            &format!("list tags of {}/{}@{}", project, repository, reference),
        )
        .await
    }

    async fn create_tag(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()> {
        let path = format!("{}/tags", artifact_path(project, repository, reference));
        let builder = self.request(Method::POST, &path).json(&CreateTagRequest {
            name: tag.to_string(),
        });
        self.send(
            builder,
            &format!("create tag {} on {}/{}@{}", tag, project, repository, reference),
        )
        .await?;
        Ok(())
    }

    async fn delete_tag(
        &self,
        project: &str,
        repository: &str,
        reference: &str,
        tag: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/tags/{}",
            artifact_path(project, repository, reference),
            urlencoding::encode(tag)
        );
        let builder = self.request(Method::DELETE, &path);
        self.send(
            builder,
            &format!("delete tag {} from {}/{}", tag, project, repository),
        )
        .await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<SearchResult> {
        let builder = self.request(Method::GET, "/search").query(&[("q", query)]);
        self.get_json(builder, &format!("search for {}", query))
            .await
    }

    async fn health(&self) -> Result<OverallHealth> {
        let builder = self.request(Method::GET, "/health");
        self.get_json(builder, "check health").await
    }

    async fn system_info(&self) -> Result<SystemInfo> {
        let builder = self.request(Method::GET, "/systeminfo");
        self.get_json(builder, "get system info").await
    }
}
