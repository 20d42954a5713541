//! Page protection flags

use std::fmt;

/// Page protection of a region, using the Windows constant values on every
/// platform so region filtering is defined once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtectionFlags {
    value: u32,
}

impl ProtectionFlags {
    // Protection constants
    pub const PAGE_NOACCESS: u32 = 0x01;
    pub const PAGE_READONLY: u32 = 0x02;
    pub const PAGE_READWRITE: u32 = 0x04;
    pub const PAGE_WRITECOPY: u32 = 0x08;
    pub const PAGE_EXECUTE: u32 = 0x10;
    pub const PAGE_EXECUTE_READ: u32 = 0x20;
    pub const PAGE_EXECUTE_READWRITE: u32 = 0x40;
    pub const PAGE_EXECUTE_WRITECOPY: u32 = 0x80;
    pub const PAGE_GUARD: u32 = 0x100;

    /// Protections a scan will read. Matched by equality, so any modifier
    /// bit (guard, nocache) excludes the region.
    const SCANNABLE: [u32; 4] = [
        Self::PAGE_READWRITE,
        Self::PAGE_READONLY,
        Self::PAGE_EXECUTE_READ,
        Self::PAGE_EXECUTE_READWRITE,
    ];

    /// Create new protection flags
    pub const fn new(value: u32) -> Self {
        ProtectionFlags { value }
    }

    /// No access protection
    pub const fn no_access() -> Self {
        ProtectionFlags::new(Self::PAGE_NOACCESS)
    }

    /// Read-only protection
    pub const fn read_only() -> Self {
        ProtectionFlags::new(Self::PAGE_READONLY)
    }

    /// Read-write protection
    pub const fn read_write() -> Self {
        ProtectionFlags::new(Self::PAGE_READWRITE)
    }

    /// Execute-only protection
    pub const fn execute() -> Self {
        ProtectionFlags::new(Self::PAGE_EXECUTE)
    }

    /// Execute-read protection
    pub const fn execute_read() -> Self {
        ProtectionFlags::new(Self::PAGE_EXECUTE_READ)
    }

    /// Execute-read-write protection
    pub const fn execute_read_write() -> Self {
        ProtectionFlags::new(Self::PAGE_EXECUTE_READWRITE)
    }

    /// Translate a `/proc/<pid>/maps` permission field such as `r-xp`
    pub fn from_maps_permissions(perms: &str) -> Self {
        let bytes = perms.as_bytes();
        let flag = |i: usize, c: u8| bytes.get(i) == Some(&c);

        match (flag(0, b'r'), flag(1, b'w'), flag(2, b'x')) {
            (true, false, false) => Self::read_only(),
            (true, true, false) => Self::read_write(),
            (true, false, true) => Self::execute_read(),
            (true, true, true) => Self::execute_read_write(),
            (false, false, true) => Self::execute(),
            _ => Self::no_access(),
        }
    }

    /// Whether a committed region with this protection is scanned
    pub fn is_scannable(&self) -> bool {
        Self::SCANNABLE.contains(&self.value)
    }

    /// Check if guard page flag is set
    pub const fn is_guard(&self) -> bool {
        (self.value & Self::PAGE_GUARD) != 0
    }

    /// Get raw value
    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for ProtectionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.value & !Self::PAGE_GUARD {
            Self::PAGE_NOACCESS => "---",
            Self::PAGE_READONLY => "r--",
            Self::PAGE_READWRITE => "rw-",
            Self::PAGE_WRITECOPY => "rc-",
            Self::PAGE_EXECUTE => "--x",
            Self::PAGE_EXECUTE_READ => "r-x",
            Self::PAGE_EXECUTE_READWRITE => "rwx",
            Self::PAGE_EXECUTE_WRITECOPY => "rcx",
            _ => return write!(f, "0x{:X}", self.value),
        };
        f.write_str(name)?;
        if self.is_guard() {
            f.write_str("+guard")?;
        }
        Ok(())
    }
}
