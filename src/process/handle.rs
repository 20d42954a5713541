//! Read-only process handle with RAII semantics

use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::memory::regions::RegionInfo;
use crate::process::MemorySource;
use std::fmt;

#[cfg(windows)]
pub use self::native::ProcessAccess;

/// Open read-only access to a process.
///
/// The underlying OS resource is released when the handle is dropped, so a
/// handle owned by a scan is closed on every path out of it.
pub struct ProcessHandle {
    inner: native::Inner,
    pid: ProcessId,
}

impl ProcessHandle {
    /// Open a process for querying regions and reading memory
    pub fn open_for_read(pid: ProcessId) -> MemoryResult<Self> {
        let inner = native::Inner::open(pid)?;
        Ok(ProcessHandle { inner, pid })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }
}

impl MemorySource for ProcessHandle {
    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
        self.inner.query_region(address)
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.inner.read_memory(address, buffer)
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessHandle(pid={})", self.pid)
    }
}

#[cfg(windows)]
mod native {
    use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
    use crate::memory::regions::{ProtectionFlags, RegionInfo, RegionState};
    use crate::windows::bindings::kernel32;
    use crate::windows::types::Handle;

    /// Access rights for process handles
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ProcessAccess {
        value: u32,
    }

    impl ProcessAccess {
        /// Query information access
        pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
        /// Read memory access
        pub const VM_READ: Self = Self { value: 0x0010 };

        /// Combine access rights
        pub fn combine(rights: &[Self]) -> Self {
            let value = rights.iter().fold(0, |acc, right| acc | right.value);
            Self { value }
        }

        /// Rights a scan needs: region queries and reads
        pub fn read_only() -> Self {
            Self::combine(&[Self::QUERY_INFORMATION, Self::VM_READ])
        }

        /// Get raw value
        pub fn value(&self) -> u32 {
            self.value
        }
    }

    pub(super) struct Inner {
        handle: Handle,
    }

    impl Inner {
        pub(super) fn open(pid: ProcessId) -> MemoryResult<Self> {
            let raw = kernel32::open_process(pid, ProcessAccess::read_only().value())?;
            Ok(Inner {
                handle: Handle::new(raw),
            })
        }

        pub(super) fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
            if self.handle.is_null() {
                return Err(MemoryError::InvalidHandle("Process handle is null".to_string()));
            }

            let mbi = unsafe { kernel32::virtual_query_ex(self.handle.raw(), address.as_usize())? };
            Ok(RegionInfo {
                base_address: Address::new(mbi.BaseAddress as usize),
                size: mbi.RegionSize,
                state: RegionState::from_raw(mbi.State),
                protection: ProtectionFlags::new(mbi.Protect),
            })
        }

        pub(super) fn read_memory(
            &self,
            address: Address,
            buffer: &mut [u8],
        ) -> MemoryResult<usize> {
            if self.handle.is_null() {
                return Err(MemoryError::InvalidHandle("Process handle is null".to_string()));
            }
            unsafe { kernel32::read_process_memory(self.handle.raw(), address.as_usize(), buffer) }
        }
    }

}

#[cfg(target_os = "linux")]
mod native {
    use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
    use crate::linux::{maps, procfs};
    use crate::memory::regions::RegionInfo;
    use std::fs::File;
    use std::os::unix::fs::FileExt;
    use std::path::PathBuf;
    use std::sync::Mutex;

    pub(super) struct Inner {
        mem: File,
        maps_path: PathBuf,
        maps: Mutex<MapsSnapshot>,
    }

    /// Parsed maps table and the highest address answered from it.
    ///
    /// A region walk queries ascending addresses, so one table serves a whole
    /// walk. A query below the last one starts a new walk and re-reads it.
    #[derive(Default)]
    struct MapsSnapshot {
        entries: Vec<maps::MapsEntry>,
        last_query: Option<Address>,
    }

    impl Inner {
        pub(super) fn open(pid: ProcessId) -> MemoryResult<Self> {
            let mem = File::open(procfs::mem_path(pid))
                .map_err(|e| MemoryError::access_denied(pid, e.to_string()))?;
            Ok(Inner {
                mem,
                maps_path: procfs::maps_path(pid),
                maps: Mutex::new(MapsSnapshot::default()),
            })
        }

        pub(super) fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
            let mut snapshot = self.maps.lock()?;
            let stale = match snapshot.last_query {
                Some(last) => address < last,
                None => true,
            };
            if stale {
                let table = std::fs::read_to_string(&self.maps_path)?;
                snapshot.entries = maps::parse_table(&table);
            }
            snapshot.last_query = Some(address);
            maps::region_at(&snapshot.entries, address)
        }

        pub(super) fn read_memory(
            &self,
            address: Address,
            buffer: &mut [u8],
        ) -> MemoryResult<usize> {
            self.mem
                .read_at(buffer, address.as_usize() as u64)
                .map_err(|e| MemoryError::read_failed(address, e.to_string()))
        }
    }
}
