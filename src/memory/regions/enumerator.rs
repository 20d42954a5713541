//! Memory region enumeration functionality

use crate::core::types::Address;
use crate::memory::regions::{ProtectionFlags, RegionState};
use crate::process::MemorySource;
use tracing::trace;

/// Information about a memory region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionInfo {
    /// Base address of the region
    pub base_address: Address,
    /// Size of the region in bytes
    pub size: usize,
    /// Current state of the region
    pub state: RegionState,
    /// Protection flags for the region
    pub protection: ProtectionFlags,
}

impl RegionInfo {
    /// Create a committed region
    pub fn committed(base_address: Address, size: usize, protection: ProtectionFlags) -> Self {
        RegionInfo {
            base_address,
            size,
            state: RegionState::Committed,
            protection,
        }
    }

    /// Create a free (unmapped) region
    pub fn free(base_address: Address, size: usize) -> Self {
        RegionInfo {
            base_address,
            size,
            state: RegionState::Free,
            protection: ProtectionFlags::no_access(),
        }
    }

    /// Check if the region is committed
    pub fn is_committed(&self) -> bool {
        self.state == RegionState::Committed
    }

    /// Whether a scan reads this region
    pub fn is_scannable(&self) -> bool {
        self.is_committed() && self.protection.is_scannable()
    }

    /// Address just past the region, wrapping to null at the top of the
    /// address space
    pub fn end_address(&self) -> Address {
        self.base_address.wrapping_add(self.size)
    }

    /// Check if an address is within this region
    pub fn contains(&self, address: Address) -> bool {
        address >= self.base_address
            && address.as_usize() - self.base_address.as_usize() < self.size
    }
}

/// Lazy walk over the scannable region bases of a process, in ascending
/// address order.
///
/// The walk starts at address zero and asks the source for the region
/// covering each next unqueried address. It ends when a query fails or the
/// next address wraps to zero. A walk is not restartable.
pub struct RegionWalk<'a, S: MemorySource + ?Sized> {
    source: &'a S,
    next_address: Address,
    finished: bool,
}

impl<'a, S: MemorySource + ?Sized> RegionWalk<'a, S> {
    /// Create a walk starting at address zero
    pub fn new(source: &'a S) -> Self {
        RegionWalk {
            source,
            next_address: Address::null(),
            finished: false,
        }
    }

    /// Query the next region, whatever its state
    fn next_region(&mut self) -> Option<RegionInfo> {
        if self.finished {
            return None;
        }

        let region = match self.source.query_region(self.next_address) {
            Ok(region) => region,
            Err(e) => {
                trace!("Region walk ended at {}: {}", self.next_address, e);
                self.finished = true;
                return None;
            }
        };

        let next = region.end_address();
        // A zero-sized or backwards answer would loop forever
        if next.is_null() || next <= self.next_address {
            self.finished = true;
        } else {
            self.next_address = next;
        }

        Some(region)
    }
}

impl<S: MemorySource + ?Sized> Iterator for RegionWalk<'_, S> {
    type Item = Address;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(region) = self.next_region() {
            if region.is_scannable() {
                return Some(region.base_address);
            }
        }
        None
    }
}

/// Start a region walk over `source`
pub fn regions<S: MemorySource + ?Sized>(source: &S) -> RegionWalk<'_, S> {
    RegionWalk::new(source)
}
