//! Application configuration loaded from TOML.
//!
//! ```toml
//! [client]
//! user_agent = "mycubing (me@example.com)"
//! max_concurrent_fetches = 8
//!
//! [dashboard]
//! neighbour_list_len = 20
//! output = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wca_data::ClientConfig;

use crate::error::{DashboardError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client, caching and pacing.
    pub client: ClientConfig,
    /// Dashboard presentation.
    pub dashboard: DashboardConfig,
}

/// How pages are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-text tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Dashboard presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How many people are listed below the neighbours podium.
    pub neighbour_list_len: usize,
    /// Events left out of the summary's record milestones.
    pub milestone_skip_events: Vec<String>,
    /// Attempts per competitor list after a rate-limit response.
    pub neighbour_retries: u32,
    /// Default output format.
    pub output: OutputFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            neighbour_list_len: 20,
            milestone_skip_events: vec!["333ft".into(), "magic".into(), "mmagic".into()],
            neighbour_retries: 3,
            output: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// carries an invalid `[client]` section.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.client.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DashboardError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists and cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns the default config file path: `~/.config/mycubing/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("mycubing").join("config.toml")
        } else if let Some(config) = dirs::config_dir() {
            config.join("mycubing").join("config.toml")
        } else {
            PathBuf::from("/tmp/mycubing-config/config.toml")
        }
    }
}
