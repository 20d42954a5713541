//! Narrowing of the result set by caller-supplied addresses

use crate::core::types::{Address, MemoryAddress, MemoryResult, ValueType};
use crate::memory::store::ResultStore;
use tracing::debug;

/// Relabel the stored entries at `address_texts` with a new value and type.
///
/// Addresses are parsed leniently, so malformed text becomes the null
/// address and matches nothing. The target process is not read again: the
/// new value is taken on the caller's word.
pub fn filter<S: AsRef<str>>(
    store: &ResultStore,
    address_texts: &[S],
    new_value: &str,
    new_type: ValueType,
) -> MemoryResult<Vec<MemoryAddress>> {
    let targets: Vec<Address> = address_texts
        .iter()
        .map(|text| Address::parse_display(text.as_ref()))
        .collect();

    let relabelled = store.relabel(&targets, new_value, new_type)?;
    debug!(
        "Filter kept {} of {} requested addresses",
        relabelled.len(),
        targets.len()
    );
    Ok(relabelled)
}
