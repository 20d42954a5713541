//! `/proc/<pid>/maps` parsing and region lookup

use crate::core::types::{Address, MemoryError, MemoryResult};
use crate::memory::regions::{ProtectionFlags, RegionInfo};

/// One line of a maps table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsEntry {
    pub start: usize,
    pub end: usize,
    pub protection: ProtectionFlags,
    pub pathname: Option<String>,
}

/// Parse a maps line such as
/// `00400000-00452000 r-xp 00000000 08:02 173521 /usr/bin/dbus-daemon`.
///
/// Returns `None` for lines that do not start with an address range and a
/// permission field.
pub fn parse_line(line: &str) -> Option<MapsEntry> {
    let mut fields = line.split_whitespace();
    let range = fields.next()?;
    let perms = fields.next()?;

    let (start, end) = range.split_once('-')?;
    let start = usize::from_str_radix(start, 16).ok()?;
    let end = usize::from_str_radix(end, 16).ok()?;
    if end <= start {
        return None;
    }

    // offset, device, inode
    let pathname = fields.nth(3).map(|first| {
        std::iter::once(first)
            .chain(fields)
            .collect::<Vec<_>>()
            .join(" ")
    });

    Some(MapsEntry {
        start,
        end,
        protection: ProtectionFlags::from_maps_permissions(perms),
        pathname,
    })
}

/// Parse every well-formed line of a maps table, in table order
pub fn parse_table(table: &str) -> Vec<MapsEntry> {
    table.lines().filter_map(parse_line).collect()
}

/// Describe the region covering `address` in a maps table.
///
/// An address inside a mapping yields that committed mapping. An address in
/// an unmapped gap yields a free region reaching up to the next mapping.
/// Past the last mapping the query fails.
pub fn query_region(table: &str, address: Address) -> MemoryResult<RegionInfo> {
    region_at(&parse_table(table), address)
}

/// [`query_region`] over already parsed entries sorted by start address
pub fn region_at(entries: &[MapsEntry], address: Address) -> MemoryResult<RegionInfo> {
    let target = address.as_usize();

    let index = entries.partition_point(|entry| entry.end <= target);
    let entry = entries
        .get(index)
        .ok_or_else(|| MemoryError::query_failed(address, "end of address space"))?;

    if entry.start <= target {
        Ok(RegionInfo::committed(
            Address::new(entry.start),
            entry.end - entry.start,
            entry.protection,
        ))
    } else {
        Ok(RegionInfo::free(address, entry.start - target))
    }
}
