//! Process information structures

use crate::core::types::ProcessId;
use std::fmt;
use std::path::PathBuf;

/// Information about a running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    /// Process ID
    pub pid: ProcessId,
    /// Executable name, as the host reports it
    pub name: String,
    /// Full path to the executable
    pub path: Option<PathBuf>,
    /// Parent process ID
    pub parent_pid: Option<ProcessId>,
}

impl ProcessInfo {
    /// Create a new ProcessInfo with minimal information
    pub fn new(pid: ProcessId, name: impl Into<String>) -> Self {
        ProcessInfo {
            pid,
            name: name.into(),
            path: None,
            parent_pid: None,
        }
    }

    /// Create ProcessInfo with full details
    pub fn with_details(
        pid: ProcessId,
        name: impl Into<String>,
        path: Option<PathBuf>,
        parent_pid: Option<ProcessId>,
    ) -> Self {
        ProcessInfo {
            pid,
            name: name.into(),
            path,
            parent_pid,
        }
    }

    /// Exact, case-sensitive executable name comparison
    pub fn name_is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.pid, self.name)?;
        if let Some(parent) = self.parent_pid {
            write!(f, " (parent {})", parent)?;
        }
        Ok(())
    }
}
