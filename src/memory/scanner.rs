//! Scan orchestration and the four public scanner operations

use crate::core::types::{
    AddressListing, FilterOutcome, MemoryAddress, MemoryError, MemoryResult, ResetOutcome,
    ScanOutcome, ValueType,
};
use crate::memory::reader::{RegionReader, MAX_REGION_SIZE};
use crate::memory::regions::regions;
use crate::memory::store::ResultStore;
use crate::memory::{codec, filter, matcher};
use crate::process::{find_process_by_name, NativeBackend, ProcessBackend};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, trace, warn};

/// Default number of regions processed per scan
pub const MAX_REGIONS: usize = 1000;

/// Bounds applied to a single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Regions processed before the scan stops early
    pub max_regions: usize,
    /// Bytes read from any one region
    pub max_region_size: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        ScanLimits {
            max_regions: MAX_REGIONS,
            max_region_size: MAX_REGION_SIZE,
        }
    }
}

/// Stage of a scan run, used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Locating,
    Opening,
    Enumerating,
    Aggregating,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Locating => "locating",
            ScanPhase::Opening => "opening",
            ScanPhase::Enumerating => "enumerating",
            ScanPhase::Aggregating => "aggregating",
        };
        f.write_str(name)
    }
}

/// Process memory scanner holding the shared result set.
///
/// All operations take `&self` and may be called from several threads. Two
/// concurrent scans walk the target independently and whichever finishes
/// last owns the result set.
pub struct MemoryScanner<B: ProcessBackend = NativeBackend> {
    backend: B,
    store: ResultStore,
    limits: ScanLimits,
}

impl MemoryScanner<NativeBackend> {
    /// Scanner for processes on this host
    pub fn new() -> Self {
        Self::with_backend(NativeBackend)
    }
}

impl Default for MemoryScanner<NativeBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ProcessBackend> MemoryScanner<B> {
    /// Scanner over a specific backend
    pub fn with_backend(backend: B) -> Self {
        MemoryScanner {
            backend,
            store: ResultStore::new(),
            limits: ScanLimits::default(),
        }
    }

    /// Replace the scan limits
    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> ScanLimits {
        self.limits
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The shared result set
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Scan the named process for `value` and replace the result set with
    /// every match.
    ///
    /// Unreadable regions contribute no matches and never fail the scan. A
    /// panic raised by the backend is reported as a failed scan.
    pub fn scan_memory(
        &self,
        process_name: &str,
        value: &str,
        value_type: ValueType,
    ) -> ScanOutcome {
        info!("Scanning {:?} for {:?} as {}", process_name, value, value_type);

        let run = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_scan(process_name, value, value_type)
        }))
        .unwrap_or_else(|payload| Err(MemoryError::Unknown(panic_reason(payload.as_ref()))));

        match run {
            Ok(addresses) => {
                let message = format!("Scan completed. Found {} matches", addresses.len());
                info!("{}", message);
                ScanOutcome::completed(addresses, message)
            }
            Err(e) => {
                warn!("Scan of {:?} failed: {}", process_name, e);
                ScanOutcome::failed(failure_message("Scan error", &e))
            }
        }
    }

    fn run_scan(
        &self,
        process_name: &str,
        value: &str,
        value_type: ValueType,
    ) -> MemoryResult<Vec<MemoryAddress>> {
        debug!("Scan phase: {}", ScanPhase::Locating);
        let pid = find_process_by_name(&self.backend, process_name)
            .ok_or_else(|| MemoryError::ProcessNotFound(process_name.to_string()))?;

        debug!("Scan phase: {} (pid {})", ScanPhase::Opening, pid);
        let handle = self.backend.open_for_read(pid)?;

        let candidates = codec::to_patterns(value, value_type);
        for candidate in &candidates {
            trace!("Candidate pattern: {}", hex::encode(candidate));
        }

        debug!("Scan phase: {}", ScanPhase::Enumerating);
        let reader = RegionReader::new(self.limits.max_region_size);
        let mut walk = regions(&handle);
        let mut matches = Vec::new();
        let mut processed = 0;

        for base in walk.by_ref().take(self.limits.max_regions) {
            processed += 1;
            let buffer = reader.read(&handle, base);
            let found = matcher::find_all(&buffer, base, &candidates, value, value_type);
            if !found.is_empty() {
                debug!(
                    "Region {}: {} matches in {} bytes",
                    base,
                    found.len(),
                    buffer.len()
                );
            }
            matches.extend(found);
        }

        if processed == self.limits.max_regions && walk.next().is_some() {
            warn!(
                "Region cap of {} reached, remaining regions not scanned",
                self.limits.max_regions
            );
        }
        drop(handle);

        debug!(
            "Scan phase: {} ({} regions, {} matches)",
            ScanPhase::Aggregating,
            processed,
            matches.len()
        );
        let response = matches.clone();
        self.store.replace(matches)?;
        Ok(response)
    }

    /// Up to `max_count` stored addresses in display form
    pub fn get_addresses(&self, max_count: usize) -> AddressListing {
        match self.store.prefix(max_count) {
            Ok(entries) => {
                let addresses: Vec<String> =
                    entries.iter().map(|e| e.address.to_display()).collect();
                let message = format!("Retrieved {} addresses", addresses.len());
                debug!("{}", message);
                AddressListing::completed(addresses, message)
            }
            Err(e) => AddressListing::failed(failure_message("Error getting addresses", &e)),
        }
    }

    /// Relabel stored entries at `addresses` with `new_value` and `value_type`
    pub fn filter_addresses<S: AsRef<str>>(
        &self,
        addresses: &[S],
        new_value: &str,
        value_type: ValueType,
    ) -> FilterOutcome {
        info!(
            "Filtering {} addresses to {:?} as {}",
            addresses.len(),
            new_value,
            value_type
        );

        match filter::filter(&self.store, addresses, new_value, value_type) {
            Ok(kept) => {
                let message = format!("Filtering completed. Found {} addresses", kept.len());
                info!("{}", message);
                FilterOutcome::completed(kept, message)
            }
            Err(e) => FilterOutcome::failed(failure_message("Filtering error", &e)),
        }
    }

    /// Clear the result set
    pub fn reset(&self) -> ResetOutcome {
        match self.store.clear() {
            Ok(()) => {
                info!("Scanner reset");
                ResetOutcome::completed("Scanner reset")
            }
            Err(e) => ResetOutcome::failed(failure_message("Reset error", &e)),
        }
    }
}

/// Text of a caught panic payload
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "panic during scan".to_string()
    }
}

/// Domain failures carry their own message; anything else is reported as a
/// fault of the named operation
fn failure_message(operation: &str, error: &MemoryError) -> String {
    if error.is_domain_failure() {
        error.to_string()
    } else {
        format!("{}: {}", operation, error)
    }
}
