//! ToolHelp32 process snapshot bindings

use crate::core::types::{MemoryError, MemoryResult};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use winapi::um::winnt::HANDLE;

/// Take a snapshot of all processes
pub fn create_process_snapshot() -> MemoryResult<HANDLE> {
    let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
    if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
        Err(MemoryError::last_os_error())
    } else {
        Ok(snapshot)
    }
}

fn empty_entry() -> PROCESSENTRY32W {
    let mut entry: PROCESSENTRY32W = unsafe { mem::zeroed() };
    entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;
    entry
}

/// First process of a snapshot
///
/// # Safety
/// `snapshot` must be a live handle from [`create_process_snapshot`]
pub unsafe fn first_process(snapshot: HANDLE) -> Option<PROCESSENTRY32W> {
    let mut entry = empty_entry();
    (Process32FirstW(snapshot, &mut entry) != FALSE).then_some(entry)
}

/// Next process of a snapshot, `None` once it is exhausted
///
/// # Safety
/// `snapshot` must be a live handle from [`create_process_snapshot`]
pub unsafe fn next_process(snapshot: HANDLE) -> Option<PROCESSENTRY32W> {
    let mut entry = empty_entry();
    (Process32NextW(snapshot, &mut entry) != FALSE).then_some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::bindings::kernel32::close_handle;

    #[test]
    fn test_snapshot_lists_processes() {
        let snapshot = create_process_snapshot().unwrap();
        unsafe {
            let first = first_process(snapshot);
            assert!(first.is_some());
            close_handle(snapshot).unwrap();
        }
    }
}
