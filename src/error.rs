//! Top-level error for the binary.
//!
//! Only startup and the CLI subcommands fail with an [`AppError`]; once the
//! TUI is running, read failures become notices instead.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw mode, the alternate screen or a draw call failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// One line for stderr, without the source chain.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::ValidationError(msg)) => {
                format!("Invalid settings: {}", msg)
            }
            AppError::Config(ConfigError::ParseError(e)) => {
                format!("config.toml could not be parsed: {}", e.message())
            }
            AppError::Config(ConfigError::NoConfigDir) => {
                "No configuration directory on this system.".to_string()
            }
            AppError::Config(_) => "Could not read or write config.toml.".to_string(),

            AppError::Api(ApiError::Unauthorized) => "GitHub rejected the token.".to_string(),
            AppError::Api(ApiError::Forbidden(_)) | AppError::Api(ApiError::RateLimited) => {
                "GitHub is rate limiting requests.".to_string()
            }
            AppError::Api(ApiError::NotFound(what)) => format!("{} does not exist.", what),
            AppError::Api(ApiError::Network(_)) => "Could not reach GitHub.".to_string(),
            AppError::Api(ApiError::Keyring(detail)) => {
                format!("The system keyring is unavailable: {}", detail)
            }
            AppError::Api(other) => format!("GitHub request failed: {}", other),

            AppError::Storage(e) => format!("Preferences could not be saved: {}", e),
            AppError::Io(e) => format!("I/O error: {}", e),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// A hint printed under the message, when there is an obvious next step.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove ~/.config/issue-blogger/config.toml.")
            }
            AppError::Api(ApiError::Unauthorized) => {
                Some("Run 'issue-blogger auth clear' or set a valid GITHUB_TOKEN.")
            }
            AppError::Api(ApiError::Forbidden(_)) | AppError::Api(ApiError::RateLimited) => {
                Some("Wait a while, or run 'issue-blogger auth set <TOKEN>' for a higher limit.")
            }
            AppError::Api(ApiError::Network(_)) => Some("Check your internet connection."),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
