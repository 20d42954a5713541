//! In-memory process backend shared by the integration tests

#![allow(dead_code)]

use memory_mcp::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use memory_mcp::memory::{ProtectionFlags, RegionInfo};
use memory_mcp::process::{MemorySource, ProcessBackend, ProcessInfo};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One region of a fake process
#[derive(Debug, Clone)]
pub struct FakeRegion {
    pub info: RegionInfo,
    pub bytes: Vec<u8>,
    pub unreadable: bool,
}

impl FakeRegion {
    /// Committed read-write region filled with `bytes`
    pub fn readable(base: usize, bytes: Vec<u8>) -> Self {
        FakeRegion {
            info: RegionInfo::committed(
                Address::new(base),
                bytes.len(),
                ProtectionFlags::read_write(),
            ),
            bytes,
            unreadable: false,
        }
    }

    /// Committed region with a custom protection
    pub fn protected(base: usize, bytes: Vec<u8>, protection: ProtectionFlags) -> Self {
        FakeRegion {
            info: RegionInfo::committed(Address::new(base), bytes.len(), protection),
            bytes,
            unreadable: false,
        }
    }

    /// Region that enumerates as scannable but whose reads fail
    pub fn unreadable(base: usize, size: usize) -> Self {
        FakeRegion {
            unreadable: true,
            ..FakeRegion::readable(base, vec![0; size])
        }
    }
}

/// Counters observed by tests
#[derive(Debug, Default)]
pub struct Counters {
    pub opens: AtomicUsize,
    pub releases: AtomicUsize,
    pub reads: AtomicUsize,
}

impl Counters {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

/// A process table plus the regions of each process
#[derive(Default)]
pub struct FakeBackend {
    processes: Vec<ProcessInfo>,
    memory: HashMap<ProcessId, Arc<Vec<FakeRegion>>>,
    denied: Vec<ProcessId>,
    pub counters: Arc<Counters>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process; regions must be sorted and non-overlapping
    pub fn with_process(mut self, pid: ProcessId, name: &str, regions: Vec<FakeRegion>) -> Self {
        self.processes.push(ProcessInfo::new(pid, name));
        self.memory.insert(pid, Arc::new(regions));
        self
    }

    /// Refuse to open `pid`
    pub fn deny(mut self, pid: ProcessId) -> Self {
        self.denied.push(pid);
        self
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

impl ProcessBackend for FakeBackend {
    type Handle = FakeHandle;
    type Processes = std::vec::IntoIter<ProcessInfo>;

    fn processes(&self) -> MemoryResult<Self::Processes> {
        Ok(self.processes.clone().into_iter())
    }

    fn open_for_read(&self, pid: ProcessId) -> MemoryResult<Self::Handle> {
        if self.denied.contains(&pid) {
            return Err(MemoryError::access_denied(pid, "denied by fake backend"));
        }
        let regions = self
            .memory
            .get(&pid)
            .cloned()
            .ok_or_else(|| MemoryError::ProcessNotFound(pid.to_string()))?;

        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        Ok(FakeHandle {
            regions,
            counters: Arc::clone(&self.counters),
        })
    }
}

/// Open fake process; counts its own release
pub struct FakeHandle {
    regions: Arc<Vec<FakeRegion>>,
    counters: Arc<Counters>,
}

impl MemorySource for FakeHandle {
    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
        let next = self
            .regions
            .iter()
            .find(|r| r.info.end_address().as_usize() > address.as_usize())
            .ok_or_else(|| MemoryError::query_failed(address, "end of address space"))?;

        if next.info.contains(address) {
            Ok(next.info.clone())
        } else {
            Ok(RegionInfo::free(
                address,
                next.info.base_address.as_usize() - address.as_usize(),
            ))
        }
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);

        let region = self
            .regions
            .iter()
            .find(|r| r.info.contains(address))
            .ok_or_else(|| MemoryError::read_failed(address, "unmapped"))?;
        if region.unreadable {
            return Err(MemoryError::read_failed(address, "page fault"));
        }

        let offset = address.as_usize() - region.info.base_address.as_usize();
        let available = &region.bytes[offset..];
        let n = buffer.len().min(available.len());
        buffer[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Buffer of `len` zero bytes with `needle` written at each offset
pub fn bytes_with(len: usize, needle: &[u8], offsets: &[usize]) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    for &offset in offsets {
        bytes[offset..offset + needle.len()].copy_from_slice(needle);
    }
    bytes
}

/// UTF-16LE bytes of `text`
pub fn wide(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}
