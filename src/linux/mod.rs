//! Linux procfs layer for process and memory access
//!
//! Processes, their executable names and their memory maps are read from
//! `/proc`; memory contents come from `/proc/<pid>/mem`.

pub mod maps;
pub mod procfs;

pub use maps::{parse_line, parse_table, query_region, region_at, MapsEntry};
