use crate::fmt::Codec;
use crate::models::{Amount, LedgerEntry};

/// Raw text of the five editable form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub prev_change: String,
    pub today_sales: String,
    pub box_actual: String,
    pub taken_saving: String,
    pub left_over: String,
}

/// Which side of the box split the operator touched last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LastEdited {
    #[default]
    None,
    TakenSaving,
    LeftOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Warn,
    Err,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InvalidNumber,
    SavingsExceedBox,
    LeftoverExceedsBox,
    ExactMatch,
    Surplus,
    Shortfall,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidNumber => "Please enter valid non-negative numbers.",
            Self::SavingsExceedBox => {
                "Negative values are not allowed: taken for saving exceeds box (leftover negative)."
            }
            Self::LeftoverExceedsBox => {
                "Negative values are not allowed: leftover exceeds box (taken for saving negative)."
            }
            Self::ExactMatch => "Exact match: actual equals expected.",
            Self::Surplus => "Positive variance: more cash than expected.",
            Self::Shortfall => "Negative variance: less cash than expected.",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::ExactMatch => Tone::Ok,
            Self::Surplus => Tone::Warn,
            Self::InvalidNumber | Self::SavingsExceedBox | Self::LeftoverExceedsBox | Self::Shortfall => {
                Tone::Err
            }
        }
    }

    /// Whether values with this status may be persisted.
    pub fn is_saveable(&self) -> bool {
        matches!(self, Self::ExactMatch | Self::Surplus | Self::Shortfall)
    }
}

/// Output of one pass of [`recompute`]. Amount fields are `None` when the
/// inputs did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub prev_change: Option<Amount>,
    pub today_sales: Option<Amount>,
    pub box_actual: Option<Amount>,
    pub taken_saving: Option<Amount>,
    pub left_over: Option<Amount>,
    pub expected_box: Option<Amount>,
    pub variance: Option<Amount>,
    pub status: Status,
    pub ok: bool,
}

impl Reconciliation {
    fn invalid() -> Self {
        Self {
            prev_change: None,
            today_sales: None,
            box_actual: None,
            taken_saving: None,
            left_over: None,
            expected_box: None,
            variance: None,
            status: Status::InvalidNumber,
            ok: false,
        }
    }

    /// Build the entry to persist. Only available when the values are saveable.
    pub fn to_entry(&self, date: &str) -> Option<LedgerEntry> {
        if !self.ok {
            return None;
        }
        Some(LedgerEntry {
            date: date.to_string(),
            prev_change: self.prev_change?,
            today_sales: self.today_sales?,
            box_actual: self.box_actual?,
            taken_saving: self.taken_saving?,
            left_over: self.left_over?,
            expected_box: self.expected_box?,
            variance: self.variance?,
        })
    }
}

/// Derive expected cash, variance and the savings/leftover split from raw
/// form text. Pure: the same inputs and marker always give the same output.
pub fn recompute(codec: &Codec, inputs: &FormInputs, last_edited: LastEdited) -> Reconciliation {
    let parsed = (
        codec.parse(&inputs.prev_change),
        codec.parse(&inputs.today_sales),
        codec.parse(&inputs.box_actual),
        codec.parse(&inputs.taken_saving),
        codec.parse(&inputs.left_over),
    );
    let (Some(prev), Some(sales), Some(box_actual), Some(taken), Some(left)) = parsed else {
        return Reconciliation::invalid();
    };

    // Subtraction of two non-negative i64 cannot overflow.
    let (taken, left) = match last_edited {
        LastEdited::LeftOver => (box_actual - left, left),
        LastEdited::TakenSaving | LastEdited::None => (taken, box_actual - taken),
    };

    let (Some(expected), Some(variance)) = (
        prev.checked_add(sales),
        prev.checked_add(sales).and_then(|e| box_actual.checked_sub(e)),
    ) else {
        return Reconciliation::invalid();
    };

    let status = if left < 0 {
        Status::SavingsExceedBox
    } else if taken < 0 {
        Status::LeftoverExceedsBox
    } else if variance == 0 {
        Status::ExactMatch
    } else if variance > 0 {
        Status::Surplus
    } else {
        Status::Shortfall
    };

    Reconciliation {
        prev_change: Some(prev),
        today_sales: Some(sales),
        box_actual: Some(box_actual),
        taken_saving: Some(taken),
        left_over: Some(left),
        expected_box: Some(expected),
        variance: Some(variance),
        status,
        ok: status.is_saveable(),
    }
}
