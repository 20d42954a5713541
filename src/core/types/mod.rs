//! Core type definitions for Memory-MCP
//!
//! This module contains the fundamental types shared by the scanner and its
//! front end: the address wrapper, value types, outcomes and the error type.

mod address;
mod error;
mod scan_result;
mod value;

// Re-export all public types
pub use address::{Address, DISPLAY_PREFIX};
pub use error::{MemoryError, MemoryResult};
pub use scan_result::{AddressListing, FilterOutcome, ResetOutcome, ScanOutcome};
pub use value::{MemoryAddress, ValueType};

// Common type aliases
pub type ProcessId = u32;
