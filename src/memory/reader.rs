//! Bounded reads of whole regions into local buffers

use crate::core::types::Address;
use crate::process::MemorySource;
use tracing::trace;

/// Ceiling on the bytes read from a single region
pub const MAX_REGION_SIZE: usize = 1024 * 1024;

/// Reads region contents for the matcher
#[derive(Debug, Clone, Copy)]
pub struct RegionReader {
    max_region_size: usize,
}

impl RegionReader {
    /// Create a reader capped at `max_region_size` bytes per region
    pub fn new(max_region_size: usize) -> Self {
        RegionReader { max_region_size }
    }

    /// Per-region read ceiling
    pub fn max_region_size(&self) -> usize {
        self.max_region_size
    }

    /// Read up to the ceiling from the region based at `base`.
    ///
    /// The region is queried again for its current size, since it may have
    /// changed since enumeration. Every failure yields an empty buffer; a
    /// short read keeps only the bytes actually read.
    pub fn read<S: MemorySource + ?Sized>(&self, source: &S, base: Address) -> Vec<u8> {
        let region = match source.query_region(base) {
            Ok(region) => region,
            Err(e) => {
                trace!("Skipping region {}: {}", base, e);
                return Vec::new();
            }
        };

        if !region.is_committed() {
            trace!("Skipping region {}: no longer committed", base);
            return Vec::new();
        }

        let size = region.size.min(self.max_region_size);
        let mut buffer = vec![0u8; size];

        match source.read_memory(base, &mut buffer) {
            Ok(bytes_read) => {
                buffer.truncate(bytes_read);
                buffer
            }
            Err(e) => {
                trace!("Read of region {} failed: {}", base, e);
                Vec::new()
            }
        }
    }
}

impl Default for RegionReader {
    fn default() -> Self {
        RegionReader::new(MAX_REGION_SIZE)
    }
}
