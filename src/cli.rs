//! Command-line argument model.

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

use std::path::PathBuf;

use admin_client::ClientConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "admin-console", about = "Admin console: session, routing and user management")]
pub struct Cli {
    /// Backend base URL; overrides `ADMIN_API_BASE_URL`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds; overrides `ADMIN_REQUEST_TIMEOUT_SECS`.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Window-title suffix; overrides `ADMIN_APP_TITLE`.
    #[arg(long, global = true)]
    pub app_title: Option<String>,

    /// Session storage file; overrides `ADMIN_STORAGE_PATH`.
    #[arg(long, global = true)]
    pub storage_path: Option<PathBuf>,

    /// Send notifications to the log instead of stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Layer flag overrides on top of the environment-derived config.
    #[must_use]
    pub fn apply_overrides(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(base_url) = &self.base_url {
            config.api_base_url = admin_client::config::normalize_base_url(base_url);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
        }
        if let Some(app_title) = &self.app_title {
            config.app_title.clone_from(app_title);
        }
        if let Some(storage_path) = &self.storage_path {
            config.storage_path.clone_from(storage_path);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the issued token.
    Login(LoginArgs),
    /// Log out remotely and clear the stored session.
    Logout,
    /// Show the local session state.
    Status,
    /// Enter the dashboard.
    Dashboard,
    /// Manage users.
    Users(UsersCommand),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, env = "ADMIN_USERNAME")]
    pub username: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Route to enter after a successful login.
    #[arg(long)]
    pub redirect: Option<String>,
}

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        username: Option<String>,
    },
    Get {
        user_id: String,
        /// Also make the fetched user the session profile.
        #[arg(long, default_value_t = false)]
        as_profile: bool,
    },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: String,
    },
    Update {
        user_id: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        user_id: String,
    },
}
