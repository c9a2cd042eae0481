use serde::{Deserialize, Serialize};

/// Integer count of minor currency units.
pub type Amount = i64;

/// One business day's reconciliation record.
///
/// Field names on the wire are camelCase, matching the persisted array and
/// the CSV header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default)]
    pub prev_change: Amount,
    #[serde(default)]
    pub today_sales: Amount,
    #[serde(default)]
    pub box_actual: Amount,
    #[serde(default)]
    pub taken_saving: Amount,
    #[serde(default)]
    pub left_over: Amount,
    #[serde(default)]
    pub expected_box: Amount,
    /// Signed: negative means less cash than expected.
    #[serde(default)]
    pub variance: Amount,
}

impl LedgerEntry {
    /// Year, month and day, if the date is a valid calendar date.
    pub fn ymd(&self) -> Option<(i32, u32, u32)> {
        use chrono::Datelike;
        let d = chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        Some((d.year(), d.month(), d.day()))
    }
}
