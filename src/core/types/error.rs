//! Custom error types for Memory-MCP

use std::fmt;
use thiserror::Error;

/// Main error type for memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: u32, reason: String },

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Failed to query memory region at {address}: {reason}")]
    QueryFailed { address: String, reason: String },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Result store lock poisoned: {0}")]
    LockPoisoned(String),

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] ::windows::core::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a new Windows API error with the last error code
    #[cfg(windows)]
    pub fn last_os_error() -> Self {
        MemoryError::WindowsApiError(::windows::core::Error::from_win32())
    }

    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a region query error
    pub fn query_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::QueryFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a domain failure the caller is expected to see
    /// (as opposed to an unexpected runtime fault).
    pub fn is_domain_failure(&self) -> bool {
        matches!(
            self,
            MemoryError::ProcessNotFound(_) | MemoryError::AccessDenied { .. }
        )
    }
}

impl<T> From<std::sync::PoisonError<T>> for MemoryError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        MemoryError::LockPoisoned(err.to_string())
    }
}
