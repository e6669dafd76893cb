//! Centralized error types for artworks-tui.
//!
//! This module provides the application-level error hierarchy with
//! user-friendly messages. Fetch failures never reach it: the table logs and
//! swallows them. What lands here is fatal for the session (configuration,
//! client construction, terminal setup).

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API client errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (terminal IO, file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Use --config to pass a file."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::InvalidUrl(url) => format!("Invalid API URL: {}", url),
                ApiError::Network(_) => {
                    "Could not set up the HTTP client. Please check your TLS setup.".to_string()
                }
                other => format!("Catalog API error: {}", other),
            },
            AppError::Io(_) => "A terminal or file operation failed.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the [settings] table in config.toml.")
            }
            AppError::Api(ApiError::InvalidUrl(_)) => {
                Some("Pass a full URL, e.g. --base-url https://api.artic.edu/api/v1")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::InvalidUrl("".to_string()).into();
        assert!(matches!(app_err, AppError::Api(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "tick_rate_ms must be greater than zero".to_string(),
        ));
        assert!(err.user_message().contains("tick_rate_ms"));
    }

    #[test]
    fn test_user_message_invalid_url() {
        let err = AppError::Api(ApiError::InvalidUrl("base URL is empty".to_string()));
        assert_eq!(err.user_message(), "Invalid API URL: base URL is empty");
    }

    #[test]
    fn test_suggested_action_validation() {
        let err = AppError::Config(ConfigError::ValidationError("x".to_string()));
        assert!(err.suggested_action().unwrap().contains("config.toml"));
    }

    #[test]
    fn test_no_suggested_action_for_io() {
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(err.suggested_action().is_none());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("raw mode unavailable");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: raw mode unavailable");
    }
}
