//! Configuration for mos-source
//!
//! Simulated latency, list behaviour and log level. Loaded from
//! `<config dir>/marketing-os/config.toml`; every key is optional:
//!
//! ```toml
//! [source]
//! latency_ms = 400
//!
//! [list]
//! sort_reset = "asc"
//! page_size = 25
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use mos_core::SortDirection;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const MAX_LATENCY_MS: u64 = 60_000;

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosConfig {
    pub source: SourceConfig,
    pub list: ListConfig,
    pub logging: LoggingConfig,
}

/// Simulated backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Fixed delay of every simulated round trip, in milliseconds
    pub latency_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { latency_ms: 400 }
    }
}

impl SourceConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// List view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Direction a column starts in when sorting switches to it
    pub sort_reset: SortDirection,
    /// Rows per page
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            sort_reset: SortDirection::Asc,
            page_size: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl MosConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Standard location of the config file
    pub fn standard_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("marketing-os").join("config.toml"))
    }

    /// Load from the standard location, or defaults if there is no file there
    pub fn load_standard() -> Result<Self, ConfigError> {
        match Self::standard_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.latency_ms > MAX_LATENCY_MS {
            return Err(ConfigError::OutOfRange(format!(
                "latency_ms must be at most {}",
                MAX_LATENCY_MS
            )));
        }

        if self.list.page_size == 0 {
            return Err(ConfigError::OutOfRange(
                "page_size must be positive".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::OutOfRange(
                "logging level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
