//! Process listing from `/proc`

use crate::core::types::{MemoryResult, ProcessId};
use crate::process::ProcessInfo;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

const PROC_ROOT: &str = "/proc";

/// Path of a process's memory file
pub fn mem_path(pid: ProcessId) -> PathBuf {
    Path::new(PROC_ROOT).join(pid.to_string()).join("mem")
}

/// Path of a process's memory map table
pub fn maps_path(pid: ProcessId) -> PathBuf {
    Path::new(PROC_ROOT).join(pid.to_string()).join("maps")
}

/// Iterator over the processes in `/proc`, in directory order.
///
/// Processes that exit while the listing runs are skipped.
pub struct ProcDirectory {
    entries: ReadDir,
}

impl ProcDirectory {
    /// Start listing `/proc`
    pub fn open() -> MemoryResult<Self> {
        Ok(ProcDirectory {
            entries: fs::read_dir(PROC_ROOT)?,
        })
    }
}

impl Iterator for ProcDirectory {
    type Item = ProcessInfo;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let Ok(entry) = entry else { continue };
            let Some(pid) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<ProcessId>().ok())
            else {
                continue;
            };

            if let Some(info) = read_process(pid, &entry.path()) {
                return Some(info);
            }
        }
        None
    }
}

/// Gather what `/proc/<pid>` says about one process
fn read_process(pid: ProcessId, dir: &Path) -> Option<ProcessInfo> {
    let exe = fs::read_link(dir.join("exe")).ok();
    let cmdline = fs::read(dir.join("cmdline")).unwrap_or_default();
    let comm = fs::read_to_string(dir.join("comm")).ok();

    let name = executable_name(exe.as_deref(), &cmdline, comm.as_deref())?;
    let parent_pid = fs::read_to_string(dir.join("stat"))
        .ok()
        .and_then(|stat| parent_pid(&stat));

    Some(ProcessInfo::with_details(pid, name, exe, parent_pid))
}

/// Executable name from the `exe` link, then `argv[0]`, then `comm`
pub fn executable_name(exe: Option<&Path>, cmdline: &[u8], comm: Option<&str>) -> Option<String> {
    if let Some(name) = exe.and_then(|path| path.file_name()).and_then(|n| n.to_str()) {
        let name = name.strip_suffix(" (deleted)").unwrap_or(name);
        return Some(name.to_string());
    }

    let argv0 = cmdline.split(|&b| b == 0).next().unwrap_or_default();
    if !argv0.is_empty() {
        let argv0 = String::from_utf8_lossy(argv0);
        if let Some(base) = argv0.rsplit('/').next().filter(|base| !base.is_empty()) {
            return Some(base.to_string());
        }
    }

    comm.map(str::trim_end)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Parent pid from a `stat` line: `pid (comm) state ppid ...`.
///
/// The comm field may itself contain spaces and parentheses, so fields are
/// counted from the last closing parenthesis.
pub fn parent_pid(stat: &str) -> Option<ProcessId> {
    let (_, rest) = stat.rsplit_once(')')?;
    rest.split_whitespace().nth(1)?.parse().ok()
}
