//! Configuration validator for Memory-MCP
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, LoggingConfig, ScannerConfig};

/// Largest per-region read the scanner accepts (64MB)
pub const MAX_REGION_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Accepted log levels
pub const VALID_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_scanner(&config.scanner)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates scanner configuration
    fn validate_scanner(scanner: &ScannerConfig) -> Result<(), ConfigError> {
        if scanner.max_regions == 0 {
            return Err(ConfigError::Invalid(
                "Maximum regions must be at least 1".to_string(),
            ));
        }

        if scanner.max_region_size == 0 {
            return Err(ConfigError::Invalid(
                "Maximum region size must be greater than 0".to_string(),
            ));
        }

        if scanner.max_region_size > MAX_REGION_SIZE_LIMIT {
            return Err(ConfigError::Invalid(
                "Maximum region size cannot exceed 64MB".to_string(),
            ));
        }

        if scanner.default_max_count == 0 {
            return Err(ConfigError::Invalid(
                "Default max count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LEVELS
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
