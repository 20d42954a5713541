//! Process discovery and read-only process access
//!
//! Two traits form the seam between the scanner and the host: a
//! [`ProcessBackend`] lists processes and opens them, and the handle it
//! returns is a [`MemorySource`] the region walk and reader run against.
//! [`NativeBackend`] implements both for the current platform.

pub mod enumerator;
pub mod handle;
pub mod info;

pub use enumerator::{find_process_by_name, ProcessEnumerator};
pub use handle::ProcessHandle;
pub use info::ProcessInfo;

use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::memory::regions::RegionInfo;

/// Read access to one process's address space
pub trait MemorySource {
    /// Describe the region covering `address`, or the next region above it.
    ///
    /// Fails once `address` is past the last region of the address space.
    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo>;

    /// Copy memory starting at `address` into `buffer`, returning the number
    /// of bytes actually read
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize>;
}

impl<S: MemorySource + ?Sized> MemorySource for &S {
    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
        (**self).query_region(address)
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        (**self).read_memory(address, buffer)
    }
}

/// Host operations the scanner needs
pub trait ProcessBackend: Send + Sync {
    /// Opened process; dropping it releases the OS resource
    type Handle: MemorySource;
    /// Live process snapshot in enumeration order
    type Processes: Iterator<Item = ProcessInfo>;

    /// Take a snapshot of the running processes
    fn processes(&self) -> MemoryResult<Self::Processes>;

    /// Open `pid` with rights to query regions and read memory, nothing more
    fn open_for_read(&self, pid: ProcessId) -> MemoryResult<Self::Handle>;
}

/// Backend for the platform the crate is built for
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl ProcessBackend for NativeBackend {
    type Handle = ProcessHandle;
    type Processes = ProcessEnumerator;

    fn processes(&self) -> MemoryResult<Self::Processes> {
        ProcessEnumerator::new()
    }

    fn open_for_read(&self, pid: ProcessId) -> MemoryResult<Self::Handle> {
        ProcessHandle::open_for_read(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_backend_lists_current_process() {
        let current = std::process::id();
        let mut processes = NativeBackend.processes().unwrap();
        assert!(processes.any(|p| p.pid == current));
    }

    #[test]
    fn test_native_backend_opens_current_process() {
        let handle = NativeBackend.open_for_read(std::process::id()).unwrap();
        assert_eq!(handle.pid(), std::process::id());
    }
}
