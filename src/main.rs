//! `admin-console`: drives the admin client core from the terminal.

mod cli;
mod commands;
mod output;

use admin_client::ClientConfig;
use admin_client::config::ConfigError;
use admin_client::net::error::{ApiError, TransportError};
use admin_client::router::RouterError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error("navigation failed: {0}")]
    Router(#[from] RouterError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("login required; run `admin-console login --redirect {redirect}`")]
    LoginRequired { redirect: String },
    #[error("login failed")]
    LoginFailed,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to load .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config = cli.apply_overrides(ClientConfig::from_env()?);
    let app = commands::App::build(config, cli.quiet)?;
    app.run(cli.command).await
}
