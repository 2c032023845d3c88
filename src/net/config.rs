//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_SESSION_FILE: &str = ".filedash-session.json";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {key}={value}")]
    Parse { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin, without trailing slash.
    pub base_url: String,
    /// Where the CLI host keeps the cached role.
    pub session_file: PathBuf,
    /// Delay between a successful signup and the redirect to login.
    pub redirect_delay: Duration,
    /// Whole-request timeout. `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            request_timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `FILEDASH_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `FILEDASH_SESSION_FILE`: default `.filedash-session.json`
    /// - `FILEDASH_REDIRECT_DELAY_MS`: default 2000
    /// - `FILEDASH_REQUEST_TIMEOUT_SECS`: unset means no timeout
    /// - `FILEDASH_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but not a valid integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = std::env::var("FILEDASH_BASE_URL")
            .map_or(defaults.base_url, |raw| normalize_base_url(&raw));
        let session_file = std::env::var_os("FILEDASH_SESSION_FILE")
            .map_or(defaults.session_file, PathBuf::from);
        let redirect_delay = env_parse_u64("FILEDASH_REDIRECT_DELAY_MS")?
            .map_or(defaults.redirect_delay, Duration::from_millis);
        let request_timeout = env_parse_u64("FILEDASH_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs);
        let connect_timeout = env_parse_u64("FILEDASH_CONNECT_TIMEOUT_SECS")?
            .map_or(defaults.connect_timeout, Duration::from_secs);

        Ok(Self { base_url, session_file, redirect_delay, request_timeout, connect_timeout })
    }

    /// Join an absolute endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Trim surrounding whitespace and any trailing slashes.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Parse { key: key.to_owned(), value: raw }),
        Err(_) => Ok(None),
    }
}
