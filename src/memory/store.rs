//! Shared set of addresses found by the last scan

use crate::core::types::{Address, MemoryAddress, MemoryResult, ValueType};
use std::sync::{Mutex, MutexGuard};

/// Mutex-guarded result set.
///
/// Every operation takes the lock once for the shortest critical section it
/// needs. Nothing expensive happens while the lock is held.
#[derive(Debug, Default)]
pub struct ResultStore {
    entries: Mutex<Vec<MemoryAddress>>,
}

impl ResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MemoryResult<MutexGuard<'_, Vec<MemoryAddress>>> {
        Ok(self.entries.lock()?)
    }

    /// Replace the whole contents; the last writer wins
    pub fn replace(&self, entries: Vec<MemoryAddress>) -> MemoryResult<()> {
        *self.lock()? = entries;
        Ok(())
    }

    /// Copy of the first `max_count` entries in store order
    pub fn prefix(&self, max_count: usize) -> MemoryResult<Vec<MemoryAddress>> {
        let entries = self.lock()?;
        Ok(entries.iter().take(max_count).cloned().collect())
    }

    /// Copy of the whole contents
    pub fn snapshot(&self) -> MemoryResult<Vec<MemoryAddress>> {
        Ok(self.lock()?.clone())
    }

    /// Relabel the first entry at each target address in place.
    ///
    /// Returns a copy of each relabelled entry, one per target that matched,
    /// in target order. Targets with no entry are skipped. Entries that were
    /// not targeted stay in the store unchanged.
    pub fn relabel(
        &self,
        targets: &[Address],
        value: &str,
        value_type: ValueType,
    ) -> MemoryResult<Vec<MemoryAddress>> {
        let mut entries = self.lock()?;
        let mut relabelled = Vec::new();

        for target in targets {
            if let Some(entry) = entries.iter_mut().find(|e| e.address == *target) {
                entry.relabel(value, value_type);
                relabelled.push(entry.clone());
            }
        }

        Ok(relabelled)
    }

    /// Remove every entry
    pub fn clear(&self) -> MemoryResult<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> MemoryResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> MemoryResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}
