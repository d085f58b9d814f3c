use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use harbor_mcp_server::config::{AppConfig, CliConfig, FileConfig, DEFAULT_PORT, DEFAULT_USERNAME};
use harbor_mcp_server::harbor::HarborClient;
use harbor_mcp_server::logging::init_logging;
use harbor_mcp_server::mcp::{create_mcp_state, stdio::run_stdio};
use harbor_mcp_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path_buf))
}

/// MCP server exposing a Harbor container registry as tools.
#[derive(Parser, Debug)]
#[clap(version)]
struct CliArgs {
    /// Harbor base URL, e.g. https://harbor.example.com
    #[clap(long, env = "HARBOR_URL")]
    pub url: Option<String>,

    /// Harbor username.
    #[clap(long, env = "HARBOR_USERNAME", default_value = DEFAULT_USERNAME)]
    pub username: String,

    /// Harbor password. Mutually exclusive with --token.
    #[clap(long, env = "HARBOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Harbor bearer token. Mutually exclusive with --password.
    #[clap(long, env = "HARBOR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable debug logging.
    #[clap(long, env = "HARBOR_DEBUG")]
    pub debug: bool,

    /// Serve MCP over HTTP + SSE instead of stdio.
    #[clap(long, env = "HARBOR_SSE")]
    pub sse: bool,

    /// The port to listen on in SSE mode.
    #[clap(short, long, env = "HARBOR_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Accept invalid TLS certificates from Harbor.
    #[clap(long, env = "HARBOR_INSECURE")]
    pub insecure: bool,

    /// The level of logging to perform on each HTTP request in SSE mode.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Timeout in seconds for Harbor requests. No timeout when unset.
    #[clap(long)]
    pub timeout_sec: Option<u64>,

    /// Path to a TOML config file. Its values override command-line values.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            token: self.token.clone(),
            debug: self.debug,
            sse: self.sse,
            port: self.port,
            insecure: self.insecure,
            logging_level: self.logging_level.clone(),
            timeout_sec: self.timeout_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)
        .context("Invalid configuration")?;

    init_logging(config.debug)?;

    info!(
        "Connecting to Harbor at {} as {} ({:?})",
        config.url, config.username, config.credentials
    );
    let harbor = HarborClient::new(config.harbor_client_config())?;
    let mcp_state = Arc::new(create_mcp_state(Arc::new(harbor)));

    let result = if config.sse {
        run_server(config.server_config(), mcp_state).await
    } else {
        run_stdio(mcp_state).await
    };

    if let Err(e) = &result {
        error!("Server stopped with error: {:#}", e);
    }
    result
}
