//! Windows API layer for process and memory access
//!
//! Provides safe wrappers around the Win32 calls the scanner needs. All
//! unsafe FFI calls are contained within this module.

pub mod bindings;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::Handle;
pub use utils::wide_to_string;

// Re-export key bindings
pub use bindings::{kernel32, toolhelp};
