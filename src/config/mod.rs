//! Configuration module for Memory-MCP
//!
//! Provides configuration loading, validation, and default settings
//! for the scanner and its front end.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults, DEFAULT_MAX_COUNT};
pub use loader::{load_config, ConfigLoader, CONFIG_ENV, DEFAULT_CONFIG_PATH};
pub use validator::{validate_config, ConfigValidator};

// Re-export the main configuration structures
pub use loader::{Config, LoggingConfig, ScannerConfig};

// Configuration-related error type
pub use loader::ConfigError;

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_export() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_config_error_from_io() {
        use std::io;
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let config_error: ConfigError = io_error.into();
        assert!(matches!(config_error, ConfigError::Io(_)));
    }

    #[test]
    fn test_config_result_type() {
        fn returns_config_result() -> ConfigResult<Config> {
            Ok(Config::default())
        }

        assert_eq!(returns_config_result().unwrap().scanner.default_max_count, DEFAULT_MAX_COUNT);
    }
}
