//! Outcome types returned by the scanner operations

use super::MemoryAddress;
use serde::{Deserialize, Serialize};

/// Result of a scan, also used for filter results
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub addresses: Vec<MemoryAddress>,
    pub count: usize,
    pub message: String,
    pub success: bool,
}

/// Filter results share the scan outcome shape
pub type FilterOutcome = ScanOutcome;

impl ScanOutcome {
    /// Successful outcome; `count` always mirrors `addresses`
    pub fn completed(addresses: Vec<MemoryAddress>, message: impl Into<String>) -> Self {
        ScanOutcome {
            count: addresses.len(),
            addresses,
            message: message.into(),
            success: true,
        }
    }

    /// Failed outcome with no addresses
    pub fn failed(message: impl Into<String>) -> Self {
        ScanOutcome {
            addresses: Vec::new(),
            count: 0,
            message: message.into(),
            success: false,
        }
    }
}

/// Read-only projection of the result store in display form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressListing {
    pub addresses: Vec<String>,
    pub count: usize,
    pub message: String,
    pub success: bool,
}

impl AddressListing {
    pub fn completed(addresses: Vec<String>, message: impl Into<String>) -> Self {
        AddressListing {
            count: addresses.len(),
            addresses,
            message: message.into(),
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        AddressListing {
            addresses: Vec::new(),
            count: 0,
            message: message.into(),
            success: false,
        }
    }
}

/// Acknowledgement of a reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub message: String,
    pub success: bool,
}

impl ResetOutcome {
    pub fn completed(message: impl Into<String>) -> Self {
        ResetOutcome {
            message: message.into(),
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ResetOutcome {
            message: message.into(),
            success: false,
        }
    }
}
