//! Configuration management for artworks-tui.
//!
//! This module handles loading the user's configuration file and applying
//! command-line overrides on top of it.

mod settings;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::{Settings, DEFAULT_BASE_URL, DEFAULT_TICK_RATE_MS, DEFAULT_TIMEOUT_SECS};

/// Name of the application directory under the platform config dir.
const APP_DIR: &str = "artworks-tui";

/// Name of the configuration file.
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[source] io::Error),

    /// The configuration file is not valid TOML for our schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but holds invalid values.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or holds
    /// invalid settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::ReadError(e)),
        };

        let config: Config = toml::from_str(&contents)?;
        config.settings.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Get the default configuration file path.
    ///
    /// - Linux: `~/.config/artworks-tui/config.toml`
    /// - macOS: `~/Library/Application Support/artworks-tui/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\artworks-tui\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Apply command-line overrides.
    ///
    /// The result is validated again, since overrides bypass the file checks.
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        log_dir: Option<PathBuf>,
    ) -> Result<()> {
        if let Some(url) = base_url {
            self.settings.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.settings.request_timeout_secs = secs;
        }
        if let Some(dir) = log_dir {
            self.settings.log_dir = Some(dir);
        }
        self.settings.validate()
    }
}
