//! Conversion of typed search values into candidate byte patterns

use crate::core::types::ValueType;

/// Candidate byte sequences to search for, in match order.
///
/// Strings produce a narrow (UTF-8) and a wide (UTF-16LE) candidate. Every
/// other type produces only the narrow bytes of its text, so numbers are
/// matched by their decimal digits rather than their machine encoding.
pub fn to_patterns(value: &str, value_type: ValueType) -> Vec<Vec<u8>> {
    if value_type.is_string() {
        vec![narrow(value), wide(value)]
    } else {
        vec![narrow(value)]
    }
}

/// Single-byte-per-character form
pub fn narrow(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Little-endian two-bytes-per-character form, without a terminator
pub fn wide(value: &str) -> Vec<u8> {
    value.encode_utf16().flat_map(u16::to_le_bytes).collect()
}
