//! Memory scanning of target processes
//!
//! This module turns a search value into byte patterns, walks the target's
//! scannable regions, reads each one into a local buffer and records every
//! match in a shared result set:
//! - [`codec`] builds candidate patterns from a typed value
//! - [`regions`] walks committed, readable regions in address order
//! - [`reader`] reads a bounded slice of one region
//! - [`matcher`] finds every candidate occurrence in a buffer
//! - [`store`] and [`filter`] hold and narrow the results
//! - [`scanner`] ties them together behind four operations

pub mod codec;
pub mod filter;
pub mod matcher;
pub mod reader;
pub mod regions;
pub mod scanner;
pub mod store;

pub use reader::{RegionReader, MAX_REGION_SIZE};
pub use regions::{ProtectionFlags, RegionInfo, RegionState};
pub use scanner::{MemoryScanner, ScanLimits, ScanPhase, MAX_REGIONS};
pub use store::ResultStore;
