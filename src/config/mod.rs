//! Startup configuration.
//!
//! Values come from the command line (each flag also readable from a
//! `HARBOR_*` environment variable) and an optional TOML file. Everything is
//! validated here, before any transport is started.

mod file_config;

pub use file_config::FileConfig;

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use reqwest::Url;

use crate::harbor::{Credentials, HarborClientConfig};
use crate::server::{RequestsLoggingLevel, ServerConfig};

pub const DEFAULT_USERNAME: &str = "admin";
pub use crate::server::config::DEFAULT_PORT;

/// CLI arguments that can be used for config resolution.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub url: Option<String>,
    pub username: String,
    pub password: Option<String>,
    pub token: Option<String>,
    pub debug: bool,
    pub sse: bool,
    pub port: u16,
    pub insecure: bool,
    pub logging_level: RequestsLoggingLevel,
    pub timeout_sec: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            token: None,
            debug: false,
            sse: false,
            port: DEFAULT_PORT,
            insecure: false,
            logging_level: RequestsLoggingLevel::default(),
            timeout_sec: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Registry base URL, without trailing slash.
    pub url: String,
    pub username: String,
    pub credentials: Credentials,
    pub debug: bool,
    /// Serve over HTTP + SSE instead of stdio.
    pub sse: bool,
    pub port: u16,
    pub insecure: bool,
    pub logging_level: RequestsLoggingLevel,
    pub timeout_sec: Option<u64>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let url = file
            .url
            .or_else(|| cli.url.clone())
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("Harbor URL must be specified via --url or in config file"))?;
        let url = validate_url(&url)?;

        let username = file.username.unwrap_or_else(|| cli.username.clone());
        if username.is_empty() {
            bail!("Username must not be empty");
        }

        let password = non_empty(file.password.or_else(|| cli.password.clone()));
        let token = non_empty(file.token.or_else(|| cli.token.clone()));
        let credentials = match (password, token) {
            (Some(password), None) => Credentials::Password(password),
            (None, Some(token)) => Credentials::Token(token),
            (Some(_), Some(_)) => bail!("Only one of password or token may be specified"),
            (None, None) => bail!("Either password or token must be specified"),
        };

        let logging_level = match file.logging_level {
            Some(level) => parse_logging_level(&level)
                .ok_or_else(|| anyhow!("Invalid logging_level in config file: {}", level))?,
            None => cli.logging_level.clone(),
        };

        Ok(Self {
            url,
            username,
            credentials,
            debug: file.debug.unwrap_or(cli.debug),
            sse: file.sse.unwrap_or(cli.sse),
            port: file.port.unwrap_or(cli.port),
            insecure: file.insecure.unwrap_or(cli.insecure),
            logging_level,
            timeout_sec: file.timeout_sec.or(cli.timeout_sec),
        })
    }

    pub fn harbor_client_config(&self) -> HarborClientConfig {
        HarborClientConfig {
            url: self.url.clone(),
            username: self.username.clone(),
            credentials: self.credentials.clone(),
            insecure: self.insecure,
            timeout_sec: self.timeout_sec,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Checks the URL parses with an http(s) scheme and a host, strips trailing slashes.
fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    let parsed = Url::parse(url).with_context(|| format!("Invalid Harbor URL: {}", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Harbor URL must start with http:// or https://: {}", url);
    }
    if parsed.host_str().is_none() {
        bail!("Harbor URL has no host: {}", url);
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
