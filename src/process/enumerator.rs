//! Process enumeration and lookup by executable name

use crate::core::types::{MemoryResult, ProcessId};
use crate::process::info::ProcessInfo;
use crate::process::ProcessBackend;
use tracing::{debug, warn};

/// Live snapshot of the running processes, in the host's enumeration order
pub struct ProcessEnumerator {
    inner: native::Snapshot,
}

impl ProcessEnumerator {
    /// Take a new snapshot
    pub fn new() -> MemoryResult<Self> {
        Ok(ProcessEnumerator {
            inner: native::Snapshot::take()?,
        })
    }
}

impl Iterator for ProcessEnumerator {
    type Item = ProcessInfo;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Find the first process whose executable name equals `name` exactly.
///
/// A snapshot failure is indistinguishable from no match to the caller.
pub fn find_process_by_name<B: ProcessBackend + ?Sized>(
    backend: &B,
    name: &str,
) -> Option<ProcessId> {
    let mut processes = match backend.processes() {
        Ok(processes) => processes,
        Err(e) => {
            warn!("Process snapshot failed: {}", e);
            return None;
        }
    };

    let found = processes.find(|p| p.name_is(name)).map(|p| p.pid);
    debug!("Process lookup for {:?}: {:?}", name, found);
    found
}

#[cfg(windows)]
mod native {
    use crate::core::types::MemoryResult;
    use crate::process::info::ProcessInfo;
    use crate::windows::bindings::toolhelp;
    use crate::windows::types::Handle;
    use crate::windows::utils::wide_to_string;
    use winapi::um::tlhelp32::PROCESSENTRY32W;

    /// ToolHelp32 process snapshot
    pub(super) struct Snapshot {
        handle: Handle,
        first_called: bool,
    }

    impl Snapshot {
        pub(super) fn take() -> MemoryResult<Self> {
            let raw = toolhelp::create_process_snapshot()?;
            Ok(Snapshot {
                handle: Handle::new(raw),
                first_called: false,
            })
        }

        pub(super) fn next(&mut self) -> Option<ProcessInfo> {
            if self.handle.is_null() {
                return None;
            }

            let entry: PROCESSENTRY32W = if self.first_called {
                unsafe { toolhelp::next_process(self.handle.raw())? }
            } else {
                self.first_called = true;
                unsafe { toolhelp::first_process(self.handle.raw())? }
            };

            Some(ProcessInfo::with_details(
                entry.th32ProcessID,
                wide_to_string(&entry.szExeFile),
                None,
                Some(entry.th32ParentProcessID),
            ))
        }
    }
}

#[cfg(target_os = "linux")]
mod native {
    use crate::core::types::MemoryResult;
    use crate::linux::procfs::ProcDirectory;
    use crate::process::info::ProcessInfo;

    /// Directory listing of `/proc`
    pub(super) struct Snapshot {
        directory: ProcDirectory,
    }

    impl Snapshot {
        pub(super) fn take() -> MemoryResult<Self> {
            Ok(Snapshot {
                directory: ProcDirectory::open()?,
            })
        }

        pub(super) fn next(&mut self) -> Option<ProcessInfo> {
            self.directory.next()
        }
    }
}
