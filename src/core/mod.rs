//! Core module containing fundamental types for Memory-MCP
//!
//! This module provides the foundational building blocks used throughout
//! the scanner, including address handling, value types, outcomes and
//! error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Address, AddressListing, FilterOutcome, MemoryAddress, MemoryError, MemoryResult,
    ResetOutcome, ScanOutcome, ValueType,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

// Platform verification at compile time
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
compile_error!("Memory-MCP only supports Windows and Linux platforms");

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Memory-MCP requires 64-bit architecture");
