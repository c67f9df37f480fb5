//! Server configuration.
//!
//! Loaded from `~/.vacancy/config.toml`; defaults are used when the file is
//! missing. The caller saves the configuration back after a successful
//! server start, so the next launch offers the settings that worked.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors loading or saving the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The operator-supplied network configuration for the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Network host the record store is published at.
    pub location: String,

    /// Registry port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            location: "localhost".to_string(),
            port: 1099,
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The default config file path: `~/.vacancy/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".vacancy").join("config.toml"))
    }
}
