//! Memory region management for target processes
//!
//! This module describes the regions of a process's address space and walks
//! them in ascending order, yielding the ones a scan is allowed to read.

pub mod enumerator;
pub mod protection;

pub use enumerator::{regions, RegionInfo, RegionWalk};
pub use protection::ProtectionFlags;

/// State of a memory region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// Memory is committed and accessible
    Committed,
    /// Memory is reserved but not committed
    Reserved,
    /// Memory is free/unallocated
    Free,
}

impl RegionState {
    /// Map a `MEMORY_BASIC_INFORMATION::State` value
    pub fn from_raw(state: u32) -> Self {
        const MEM_COMMIT: u32 = 0x1000;
        const MEM_RESERVE: u32 = 0x2000;

        match state {
            MEM_COMMIT => RegionState::Committed,
            MEM_RESERVE => RegionState::Reserved,
            _ => RegionState::Free,
        }
    }
}
