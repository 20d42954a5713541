//! Memory address wrapper type with hex parsing and display

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix used by the canonical display form
pub const DISPLAY_PREFIX: &str = "0x";

/// Represents a memory address in the target process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub usize);

impl Address {
    /// Creates a new address from a usize value
    pub const fn new(value: usize) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns the address `offset` bytes above this one, or `None` on overflow
    pub const fn checked_add(&self, offset: usize) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(value) => Some(Address(value)),
            None => None,
        }
    }

    /// Returns the address `offset` bytes above this one, wrapping at the top
    /// of the address space
    pub const fn wrapping_add(&self, offset: usize) -> Self {
        Address(self.0.wrapping_add(offset))
    }

    /// Returns the raw usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Canonical display form: `0x` followed by uppercase hex, no padding
    pub fn to_display(&self) -> String {
        self.to_string()
    }

    /// Lenient inverse of [`Address::to_display`].
    ///
    /// Malformed text yields the null address instead of an error, so an
    /// unparseable address simply matches nothing downstream.
    pub fn parse_display(text: &str) -> Self {
        text.parse().unwrap_or_else(|_| Address::null())
    }
}

impl FromStr for Address {
    type Err = MemoryError;

    /// Strict hex parse; the `0x`/`0X` prefix is optional.
    fn from_str(s: &str) -> MemoryResult<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        // from_str_radix accepts a leading '+', hex text never carries one
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MemoryError::InvalidAddress(s.to_string()));
        }

        usize::from_str_radix(digits, 16)
            .map(Address::new)
            .map_err(|_| MemoryError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:X}", DISPLAY_PREFIX, self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Address::new(value)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address::new(value as usize)
    }
}
