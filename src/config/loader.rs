//! Configuration loader for Memory-MCP
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use super::validator::validate_config;
use crate::memory::ScanLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "MEMORY_MCP_CONFIG";

/// Configuration file used when the environment does not name one
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_scanner")]
    pub scanner: ScannerConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default = "default_max_regions")]
    pub max_regions: usize,
    #[serde(default = "default_max_region_size")]
    pub max_region_size: usize,
    #[serde(default = "default_max_count")]
    pub default_max_count: usize,
}

impl ScannerConfig {
    /// Per-scan bounds for the scanner
    pub fn limits(&self) -> ScanLimits {
        ScanLimits {
            max_regions: self.max_regions,
            max_region_size: self.max_region_size,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loader for the file named by `MEMORY_MCP_CONFIG`, or `config.toml`
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        ConfigLoader::new(path)
    }

    /// Path this loader reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration or returns defaults if file doesn't exist
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_default()
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Load and validate the configuration behind `loader`.
///
/// A missing file yields the defaults. A file that fails to parse or
/// validate is an error.
pub fn load_config(loader: &ConfigLoader) -> Result<Config, ConfigError> {
    let config = match loader.load() {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) => return Ok(Config::default()),
        Err(e) => return Err(e),
    };

    validate_config(&config)?;
    Ok(config)
}

// Default functions for serde
fn default_scanner() -> ScannerConfig {
    let defaults = default_config();
    ScannerConfig {
        max_regions: defaults.scanner.max_regions,
        max_region_size: defaults.scanner.max_region_size,
        default_max_count: defaults.scanner.default_max_count,
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_config().logging.level,
    }
}

// Individual field defaults
fn default_max_regions() -> usize {
    default_config().scanner.max_regions
}

fn default_max_region_size() -> usize {
    default_config().scanner.max_region_size
}

fn default_max_count() -> usize {
    default_config().scanner.default_max_count
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scanner: default_scanner(),
            logging: default_logging(),
        }
    }
}
