//! Default configuration values for Memory-MCP

use crate::memory::{MAX_REGIONS, MAX_REGION_SIZE};
use serde::{Deserialize, Serialize};

/// Default number of addresses listed when a caller gives no count
pub const DEFAULT_MAX_COUNT: usize = 100;

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub scanner: ScannerDefaults,
    pub logging: LoggingDefaults,
}

/// Default scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerDefaults {
    pub max_regions: usize,
    pub max_region_size: usize,
    pub default_max_count: usize,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        scanner: ScannerDefaults {
            max_regions: MAX_REGIONS,
            max_region_size: MAX_REGION_SIZE, // 1MB
            default_max_count: DEFAULT_MAX_COUNT,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
