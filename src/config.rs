//! Client configuration
//!
//! Read from `~/.config/facecards/config.toml` when present:
//!
//! ```toml
//! server_url = "https://cards.example.com"
//! token = "eyJhbGciOi..."
//! request_timeout_secs = 30
//! study_limit = 20
//! ```
//!
//! `FACECARDS_SERVER_URL` and `FACECARDS_TOKEN` override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SERVER_URL_ENV: &str = "FACECARDS_SERVER_URL";
pub const TOKEN_ENV: &str = "FACECARDS_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the flashcard service
    pub server_url: String,
    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Upper bound for a whole request, including the response body
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Cards per study session; the service picks its own default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_limit: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8001".to_string(),
            token: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            study_limit: None,
        }
    }
}

impl ClientConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("facecards").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load the default config file (if any), then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Ok(path) => Self::from_file(&path)?,
            Err(e) => {
                log::debug!("No config directory, using defaults: {}", e);
                Self::default()
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(SERVER_URL_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        );
    }

    /// Override the server URL and token; blank values are ignored
    pub fn apply_overrides(&mut self, server_url: Option<String>, token: Option<String>) {
        if let Some(url) = server_url.filter(|s| !s.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(token) = token.filter(|s| !s.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ClientConfig::from_file(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "server_url = \"https://cards.example.com\"\nstudy_limit = 20\n").unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        assert_eq!(config.server_url, "https://cards.example.com");
        assert_eq!(config.study_limit, Some(20));
        assert_eq!(config.token, None);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

        let err = ClientConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = ClientConfig::default();
        config.apply_overrides(Some("  ".to_string()), Some("abc".to_string()));
        assert_eq!(config.server_url, "http://localhost:8001");
        assert_eq!(config.token.as_deref(), Some("abc"));
    }
}
