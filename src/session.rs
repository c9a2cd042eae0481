use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::info;

use crate::db::Slot;
use crate::error::{Result, TillError};
use crate::fmt::Codec;
use crate::models::LedgerEntry;
use crate::reconciler::{recompute, FormInputs, LastEdited, Reconciliation, Status};
use crate::store::EntryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PrevChange,
    TodaySales,
    BoxActual,
    TakenSaving,
    LeftOver,
}

pub const FIELDS: &[Field] = &[
    Field::PrevChange,
    Field::TodaySales,
    Field::BoxActual,
    Field::TakenSaving,
    Field::LeftOver,
];

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PrevChange => "Previous change",
            Self::TodaySales => "Today's sales",
            Self::BoxActual => "Cash in box",
            Self::TakenSaving => "Taken for saving",
            Self::LeftOver => "Leftover change",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(usize),
    Updated(usize),
}

/// The in-progress form: raw field text, the last-edited marker and the
/// index of the entry being edited, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub date: String,
    inputs: FormInputs,
    last_edited: LastEdited,
    edit_index: Option<usize>,
}

static DATE_SHAPE: OnceLock<Regex> = OnceLock::new();

fn date_shape() -> &'static Regex {
    DATE_SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date pattern"))
}

/// Strict `YYYY-MM-DD` that is also a real calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if !date_shape().is_match(raw) {
        return Err(TillError::Validation(format!("Invalid date '{raw}': use YYYY-MM-DD")));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TillError::Validation(format!("Invalid date '{raw}': no such day")))
}

impl Session {
    /// A blank form for `today`, seeded from the ledger's last leftover.
    pub fn new<S: Slot>(store: &EntryStore<S>, codec: &Codec, today: NaiveDate) -> Self {
        let mut session = Self::default();
        session.reset(store, codec, today);
        session
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::PrevChange => &self.inputs.prev_change,
            Field::TodaySales => &self.inputs.today_sales,
            Field::BoxActual => &self.inputs.box_actual,
            Field::TakenSaving => &self.inputs.taken_saving,
            Field::LeftOver => &self.inputs.left_over,
        }
    }

    /// Update one field. Touching either side of the savings/leftover split
    /// makes it the side the other is derived from.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) {
        let text = text.into();
        match field {
            Field::PrevChange => self.inputs.prev_change = text,
            Field::TodaySales => self.inputs.today_sales = text,
            Field::BoxActual => self.inputs.box_actual = text,
            Field::TakenSaving => {
                self.inputs.taken_saving = text;
                self.last_edited = LastEdited::TakenSaving;
            }
            Field::LeftOver => {
                self.inputs.left_over = text;
                self.last_edited = LastEdited::LeftOver;
            }
        }
    }

    pub fn recompute(&self, codec: &Codec) -> Reconciliation {
        recompute(codec, &self.inputs, self.last_edited)
    }

    /// Clear the form, cancel any edit and seed previous change.
    pub fn reset<S: Slot>(&mut self, store: &EntryStore<S>, codec: &Codec, today: NaiveDate) {
        self.date = today.format("%Y-%m-%d").to_string();
        self.inputs = FormInputs::default();
        self.last_edited = LastEdited::None;
        self.edit_index = None;
        self.seed_prev_change(store, codec);
    }

    fn seed_prev_change<S: Slot>(&mut self, store: &EntryStore<S>, codec: &Codec) {
        self.inputs.prev_change = codec.format(store.last_left_over().unwrap_or(0));
    }

    /// Load an existing entry into the form for editing.
    pub fn begin_edit<S: Slot>(&mut self, store: &EntryStore<S>, codec: &Codec, index: usize) -> Result<()> {
        let entry = store.get(index).ok_or(TillError::IndexOutOfRange {
            index,
            len: store.len(),
        })?;
        self.date = entry.date.clone();
        self.inputs = FormInputs {
            prev_change: codec.format(entry.prev_change),
            today_sales: codec.format(entry.today_sales),
            box_actual: codec.format(entry.box_actual),
            taken_saving: codec.format(entry.taken_saving),
            left_over: codec.format(entry.left_over),
        };
        self.last_edited = LastEdited::None;
        self.edit_index = Some(index);
        Ok(())
    }

    /// Persist the form as a new entry, or over the entry being edited.
    /// Later entries are never adjusted. The form is reset afterwards.
    pub fn save<S: Slot>(
        &mut self,
        store: &mut EntryStore<S>,
        codec: &Codec,
        today: NaiveDate,
    ) -> Result<SaveOutcome> {
        let date = parse_date(&self.date)?.format("%Y-%m-%d").to_string();
        let reconciliation = self.recompute(codec);
        let entry = reconciliation
            .to_entry(&date)
            .ok_or_else(|| rejection(reconciliation.status))?;

        let outcome = match self.edit_index {
            Some(index) => {
                store.replace(index, entry)?;
                info!(index, date = %date, "entry updated");
                SaveOutcome::Updated(index)
            }
            None => {
                let index = store.append(entry)?;
                info!(index, date = %date, "entry saved");
                SaveOutcome::Created(index)
            }
        };
        self.reset(store, codec, today);
        Ok(outcome)
    }

    /// Remove an entry and keep the edit cursor pointing at the same entry.
    /// Deleting the entry under edit cancels the edit.
    pub fn delete<S: Slot>(
        &mut self,
        store: &mut EntryStore<S>,
        codec: &Codec,
        index: usize,
        today: NaiveDate,
    ) -> Result<LedgerEntry> {
        let removed = store.remove_at(index)?;
        info!(index, date = %removed.date, "entry deleted");
        match self.edit_index {
            Some(editing) if editing == index => self.reset(store, codec, today),
            Some(editing) if editing > index => self.edit_index = Some(editing - 1),
            _ => {}
        }
        if self.edit_index.is_none() {
            self.seed_prev_change(store, codec);
        }
        Ok(removed)
    }
}

fn rejection(status: Status) -> TillError {
    match status {
        Status::SavingsExceedBox => TillError::NegativeValue("taken for saving exceeds box".into()),
        Status::LeftoverExceedsBox => TillError::NegativeValue("leftover exceeds box".into()),
        _ => TillError::InvalidNumber,
    }
}
