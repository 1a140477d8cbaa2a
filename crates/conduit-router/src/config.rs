//! Static gateway configuration.
//!
//! The model list is loaded once at startup from a TOML file; its order is
//! the selection order used by the selector. Nothing here is hot-reloaded.

use crate::classifier::TaskLabel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading the gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One configured model entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Stable model identifier handed to the backend dispatcher.
    pub id: String,
    /// Task labels this model should serve.
    #[serde(default)]
    pub tasks: Vec<TaskLabel>,
    /// Free-form capability tags for tie-breaking.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Per-window call limit override; the tracker default applies when
    /// absent.
    #[serde(default)]
    pub max_calls_per_window: Option<u64>,
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Configured models, in selection order.
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

impl GatewayConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parses the configuration from a TOML string.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the string is not valid configuration TOML.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}
