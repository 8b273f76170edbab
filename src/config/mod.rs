//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables
//! - CLI arguments

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod types;

pub use types::{LoggingConfig, PointerConfig, SensorConfig, SensorSource, TrackingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Sensor acquisition configuration
    #[serde(default)]
    pub sensor: SensorConfig,
    /// Pointer injection configuration
    #[serde(default)]
    pub pointer: PointerConfig,
    /// Hand tracking configuration
    #[serde(default)]
    pub tracking: TrackingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Well-known config location (`~/.config/handmouse/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("handmouse").join("config.toml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.pointer.backend.as_str() {
            "enigo" | "null" => {}
            other => anyhow::bail!("Invalid pointer backend: {}", other),
        }

        // Screen override must be complete to be usable
        match (self.pointer.screen_width, self.pointer.screen_height) {
            (None, None) | (Some(_), Some(_)) => {}
            _ => anyhow::bail!("screen_width and screen_height must be set together"),
        }
        if self.pointer.screen_width == Some(0) || self.pointer.screen_height == Some(0) {
            anyhow::bail!("Screen dimensions must be nonzero");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!("Invalid log level: {}", other),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, source: Option<SensorSource>, dry_run: bool) -> Self {
        if let Some(source) = source {
            self.sensor.source = Some(source);
        }
        if dry_run {
            self.pointer.backend = "null".to_string();
        }

        self
    }
}
