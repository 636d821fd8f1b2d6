//! Client configuration: TOML file, then environment, then CLI flags.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ConfigError;
use crate::http_client::DEFAULT_SERVER_URL;

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "MASTERMIND_SERVER_URL";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "MASTERMIND_LOG_FILE";

/// Settings for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Mastermind server.
    server_url: String,

    /// Where logs are written. The terminal is owned by the UI.
    log_file: PathBuf,

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            log_file: PathBuf::from("./app.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path` if given, otherwise starts from defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies overrides from the process environment.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides using `lookup` to read variables.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(server_url = %url, "Server URL overridden by environment");
            self.server_url = url;
        }
        if let Some(file) = lookup(LOG_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(log_file = %file, "Log file overridden by environment");
            self.log_file = PathBuf::from(file);
        }
        self
    }

    /// Replaces the server URL.
    pub fn set_server_url(&mut self, server_url: impl Into<String>) {
        self.server_url = server_url.into();
    }

    /// Replaces the log file path.
    pub fn set_log_file(&mut self, log_file: impl Into<PathBuf>) {
        self.log_file = log_file.into();
    }

    /// Checks that the configuration is usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "server_url must start with http:// or https://, got {:?}",
                self.server_url
            )));
        }
        Ok(())
    }
}
