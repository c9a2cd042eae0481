use tracing::{debug, error, warn};

use crate::db::Slot;
use crate::error::{Result, TillError};
use crate::models::{Amount, LedgerEntry};

pub const ENTRIES_KEY: &str = "salesEntries";
pub const VERSION_KEY: &str = "schemaVersion";
pub const SCHEMA_VERSION: u32 = 1;

/// The ordered entry list plus the slot it is persisted to.
///
/// Insertion order is chronological entry order; the list is never re-sorted.
/// Every mutation rewrites the whole list to the slot before returning.
pub struct EntryStore<S: Slot> {
    slot: S,
    entries: Vec<LedgerEntry>,
}

impl<S: Slot> EntryStore<S> {
    /// Load the list from the slot. A missing slot or one holding corrupt JSON
    /// gives an empty ledger; a failed read is an error, so a later persist
    /// cannot overwrite entries that were never loaded.
    pub fn load(slot: S) -> Result<Self> {
        let entries = match slot.read(ENTRIES_KEY)? {
            Some(raw) => {
                check_version(&slot);
                match serde_json::from_str::<Vec<LedgerEntry>>(&raw) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!(error = %e, "stored ledger is corrupt, starting empty");
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };
        debug!(count = entries.len(), "ledger loaded");
        Ok(Self { slot, entries })
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    pub fn append(&mut self, entry: LedgerEntry) -> Result<usize> {
        self.entries.push(entry);
        self.persist()?;
        Ok(self.entries.len() - 1)
    }

    pub fn replace(&mut self, index: usize, entry: LedgerEntry) -> Result<()> {
        self.check_index(index)?;
        self.entries[index] = entry;
        self.persist()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<LedgerEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Replace the whole list in one step.
    pub fn set_all(&mut self, entries: Vec<LedgerEntry>) -> Result<()> {
        self.entries = entries;
        self.persist()
    }

    /// The leftover of the most recent entry, which seeds the next day's
    /// previous change. `None` when the ledger is empty.
    pub fn last_left_over(&self) -> Option<Amount> {
        self.entries.last().map(|e| e.left_over)
    }

    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.slot.write(ENTRIES_KEY, &json)?;
        self.slot.write(VERSION_KEY, &SCHEMA_VERSION.to_string())?;
        debug!(count = self.entries.len(), "ledger persisted");
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            error!(index, len = self.entries.len(), "entry index out of range");
            return Err(TillError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

fn check_version<S: Slot>(slot: &S) {
    match slot.read(VERSION_KEY) {
        Ok(Some(v)) if v.trim() != SCHEMA_VERSION.to_string() => {
            warn!(found = %v, expected = SCHEMA_VERSION, "unknown ledger schema version");
        }
        _ => {}
    }
}
