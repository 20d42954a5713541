//! Memory-MCP library for scanning the memory of running processes
//!
//! A [`MemoryScanner`] finds a process by executable name, walks its
//! readable memory regions and records every address holding a search
//! value. The found set can then be listed, narrowed and cleared. The
//! [`mcp`] module exposes the same operations over a line-oriented JSON-RPC
//! channel.

pub mod config;
pub mod core;
pub mod mcp;
pub mod memory;
pub mod process;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(windows)]
pub mod windows;

// Re-export main types from core module
pub use crate::core::types::{
    Address, AddressListing, FilterOutcome, MemoryAddress, MemoryError, MemoryResult, ProcessId,
    ResetOutcome, ScanOutcome, ValueType,
};
pub use crate::core::{AUTHORS, VERSION};

pub use memory::{MemoryScanner, ResultStore, ScanLimits};
pub use process::{MemorySource, NativeBackend, ProcessBackend, ProcessInfo};
