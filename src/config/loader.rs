use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, ListConfig};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/carelist/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("carelist").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Page sizes are positive
    /// - The API base URL parses
    /// - List names are unique and paths are absolute
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.page_size == 0 {
            return Err(validation("defaults.page_size must be greater than 0"));
        }

        if self.api.base_url.trim().is_empty() {
            return Err(validation("api.base_url must not be empty"));
        }
        if let Err(e) = reqwest::Url::parse(&self.api.base_url) {
            return Err(validation(format!(
                "api.base_url '{}' is not a valid URL: {}",
                self.api.base_url, e
            )));
        }

        let mut seen = HashSet::new();
        for list in &self.lists {
            validate_list(list)?;
            if !seen.insert(list.name.as_str()) {
                return Err(validation(format!("Duplicate list name '{}'", list.name)));
            }
        }

        Ok(())
    }

    /// Look up a configured list by name.
    pub fn list(&self, name: &str) -> Option<&ListConfig> {
        self.lists.iter().find(|l| l.name == name)
    }
}

fn validate_list(list: &ListConfig) -> Result<(), ConfigError> {
    if list.name.trim().is_empty() {
        return Err(validation("List name must not be empty"));
    }
    if !list.path.starts_with('/') {
        return Err(validation(format!(
            "List '{}' path '{}' must start with '/'",
            list.name, list.path
        )));
    }
    if list.page_size == Some(0) {
        return Err(validation(format!(
            "List '{}' page_size must be greater than 0",
            list.name
        )));
    }
    Ok(())
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
