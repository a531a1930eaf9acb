//! Configuration management for Issue Blogger.
//!
//! Settings are read from `config.toml` in the platform config directory.
//! A missing file means defaults; command line flags override either.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::api::RepoRef;

pub use settings::{Settings, DEFAULT_TICK_RATE_MS, MAX_PAGE_SIZE};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no config directory.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    #[error("failed to create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    #[error("failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    #[error("failed to write configuration file: {0}")]
    WriteError(std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The configuration is well-formed but unusable.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The on-disk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`, defaulting when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)
    }

    /// Check that the settings can be used.
    pub fn validate(&self) -> Result<()> {
        let s = &self.settings;

        if s.owner.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "owner cannot be empty".to_string(),
            ));
        }

        if s.repo.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "repo cannot be empty".to_string(),
            ));
        }

        if s.page_size == 0 || s.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, s.page_size
            )));
        }

        if !s.api_base_url.starts_with("https://") && !s.api_base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api_base_url '{}' must start with http:// or https://",
                s.api_base_url
            )));
        }

        Ok(())
    }

    /// The configured repository.
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.settings.owner, &self.settings.repo)
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("issue-blogger").join("config.toml"))
    }
}
