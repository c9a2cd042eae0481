use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::Slot;
use crate::error::{Result, TillError};
use crate::models::LedgerEntry;
use crate::store::EntryStore;
use crate::transcoder;

pub const PENDING_KEY: &str = "pendingImport";

/// Rows shown when previewing a staged import.
pub const PREVIEW_ROWS: usize = 10;

/// Two-phase CSV import: a decoded candidate is previewed and only replaces
/// the ledger once confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ImportSession {
    #[default]
    Idle,
    Previewing {
        source: String,
        candidate: Vec<LedgerEntry>,
    },
}

pub struct ImportSummary {
    pub imported: usize,
    pub replaced: usize,
}

impl ImportSession {
    /// Decode `text` and hold it for preview. Replaces any earlier candidate.
    pub fn stage(&mut self, source: &str, text: &str) -> Result<usize> {
        let candidate = transcoder::decode(text)?;
        if candidate.is_empty() {
            return Err(TillError::EmptyFile);
        }
        let count = candidate.len();
        info!(source, count, "import staged");
        *self = Self::Previewing {
            source: source.to_string(),
            candidate,
        };
        Ok(count)
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self, Self::Previewing { .. })
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Previewing { source, .. } => Some(source),
            Self::Idle => None,
        }
    }

    /// The first [`PREVIEW_ROWS`] rows of the candidate.
    pub fn preview(&self) -> &[LedgerEntry] {
        match self {
            Self::Previewing { candidate, .. } => &candidate[..candidate.len().min(PREVIEW_ROWS)],
            Self::Idle => &[],
        }
    }

    pub fn candidate_len(&self) -> usize {
        match self {
            Self::Previewing { candidate, .. } => candidate.len(),
            Self::Idle => 0,
        }
    }

    /// Commit the full candidate to the store and return to idle.
    pub fn confirm<S: Slot>(&mut self, store: &mut EntryStore<S>) -> Result<ImportSummary> {
        let Self::Previewing { candidate, .. } = self else {
            return Err(TillError::NoPendingImport);
        };
        let replaced = store.len();
        let imported = candidate.len();
        store.set_all(candidate.clone())?;
        *self = Self::Idle;
        info!(imported, replaced, "import confirmed");
        Ok(ImportSummary { imported, replaced })
    }

    /// Drop the candidate without touching the ledger.
    pub fn cancel(&mut self) -> Result<()> {
        if !self.is_previewing() {
            return Err(TillError::NoPendingImport);
        }
        *self = Self::Idle;
        info!("import canceled");
        Ok(())
    }

    /// Restore a session saved by an earlier command. Missing or unreadable
    /// state means nothing is staged.
    pub fn load<S: Slot>(slot: &S) -> Self {
        match slot.read(PENDING_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "discarding unreadable staged import");
                Self::Idle
            }),
            Ok(None) => Self::Idle,
            Err(e) => {
                warn!(error = %e, "could not read staged import");
                Self::Idle
            }
        }
    }

    pub fn save<S: Slot>(&self, slot: &mut S) -> Result<()> {
        match self {
            Self::Idle => slot.remove(PENDING_KEY),
            Self::Previewing { .. } => slot.write(PENDING_KEY, &serde_json::to_string(self)?),
        }
    }
}
