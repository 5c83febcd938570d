//! Application configuration file.
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! running without `--config` behaves exactly like loading one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::catalog::Coordinates;
use crate::geolocation::DetectionPolicy;

pub const DEFAULT_CITY: &str = "Mumbai";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings that can be saved/loaded as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // Catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>, // None = built-in catalog

    // Location detection
    pub default_city: String,
    pub detection: DetectionPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_position: Option<Coordinates>, // None = host cannot report a position

    // Logging
    pub log_level: String, // EnvFilter directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise use the defaults. The result is validated.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_city.trim().is_empty() {
            anyhow::bail!("Default city must be specified");
        }

        if EnvFilter::try_new(&self.log_level).is_err() {
            anyhow::bail!("Invalid log level: {:?}", self.log_level);
        }

        if let Some(position) = &self.device_position {
            if !position.is_valid() {
                anyhow::bail!("Device position is out of range (lat -90..90, lng -180..180)");
            }
        }

        if let Some(path) = &self.catalog_path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Catalog path cannot be empty");
            }
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_city: DEFAULT_CITY.to_string(),
            detection: DetectionPolicy::default(),
            device_position: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}
