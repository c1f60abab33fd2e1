//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_APP_TITLE: &str = "Admin Console";
const STORAGE_DIR_NAME: &str = "admin-console";
const STORAGE_FILE_NAME: &str = "storage.json";

/// Errors produced while reading client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but its value could not be used.
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to, without a trailing `/`.
    pub api_base_url: String,
    /// Overall per-request timeout enforced by the transport.
    pub request_timeout_secs: u64,
    /// Suffix used when composing window titles.
    pub app_title: String,
    /// Location of the durable key-value file holding the session token.
    pub storage_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            app_title: DEFAULT_APP_TITLE.to_owned(),
            storage_path: default_storage_path(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `ADMIN_API_BASE_URL`: default `http://127.0.0.1:8080/api`
    /// - `ADMIN_REQUEST_TIMEOUT_SECS`: default 10, must be positive
    /// - `ADMIN_APP_TITLE`: default `Admin Console`
    /// - `ADMIN_STORAGE_PATH`: default `<config dir>/admin-console/storage.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = env_string("ADMIN_API_BASE_URL").unwrap_or(defaults.api_base_url);
        let request_timeout_secs = match env_string("ADMIN_REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_timeout_secs("ADMIN_REQUEST_TIMEOUT_SECS", &raw)?,
            None => defaults.request_timeout_secs,
        };
        let app_title = env_string("ADMIN_APP_TITLE").unwrap_or(defaults.app_title);
        let storage_path = env_string("ADMIN_STORAGE_PATH").map_or(defaults.storage_path, PathBuf::from);

        Ok(Self { api_base_url: normalize_base_url(&api_base_url), request_timeout_secs, app_title, storage_path })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Strip trailing slashes so request paths can always start with `/`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// Parse a timeout in whole seconds; zero is rejected.
///
/// # Errors
///
/// Returns an error when `raw` is not a positive integer.
pub fn parse_timeout_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue { var, value: raw.to_owned() }),
    }
}

fn env_string(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn default_storage_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(STORAGE_DIR_NAME).join(STORAGE_FILE_NAME),
        None => PathBuf::from(STORAGE_DIR_NAME).join(STORAGE_FILE_NAME),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
