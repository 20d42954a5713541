//! Exhaustive byte pattern matching over region buffers

use crate::core::types::{Address, MemoryAddress, ValueType};

/// Find every occurrence of every candidate in `buffer`.
///
/// Results are grouped by candidate, in candidate order, and by ascending
/// offset within each group. Each hit is recorded at `region_base + offset`
/// and tagged with the requested value and type, not the matched byte form.
/// Overlapping hits from different candidates are all kept.
pub fn find_all(
    buffer: &[u8],
    region_base: Address,
    candidates: &[Vec<u8>],
    value: &str,
    value_type: ValueType,
) -> Vec<MemoryAddress> {
    candidates
        .iter()
        .flat_map(|candidate| find_offsets(buffer, candidate))
        .map(|offset| MemoryAddress::new(region_base.wrapping_add(offset), value, value_type))
        .collect()
}

/// Start offsets of `needle` in `haystack`.
///
/// An empty needle, or one longer than the haystack, has no matches.
pub fn find_offsets<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    // windows() panics on a zero size
    let width = needle.len().max(1);
    let usable = !needle.is_empty() && needle.len() <= haystack.len();

    haystack
        .windows(width)
        .enumerate()
        .filter(move |(_, window)| usable && *window == needle)
        .map(|(offset, _)| offset)
}
