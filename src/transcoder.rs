use chrono::NaiveDate;

use crate::error::{Result, TillError};
use crate::models::{Amount, LedgerEntry};

// ---------------------------------------------------------------------------
// Columns — enum dispatch over the fixed field set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column {
    Date,
    TodaySales,
    BoxActual,
    PrevChange,
    TakenSaving,
    LeftOver,
    ExpectedBox,
    Variance,
}

/// Export order. The header row is these labels joined by commas.
pub const COLUMNS: &[Column] = &[
    Column::Date,
    Column::TodaySales,
    Column::BoxActual,
    Column::PrevChange,
    Column::TakenSaving,
    Column::LeftOver,
    Column::ExpectedBox,
    Column::Variance,
];

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::TodaySales => "todaySales",
            Self::BoxActual => "boxActual",
            Self::PrevChange => "prevChange",
            Self::TakenSaving => "takenSaving",
            Self::LeftOver => "leftOver",
            Self::ExpectedBox => "expectedBox",
            Self::Variance => "variance",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        COLUMNS.iter().find(|c| c.label() == label).copied()
    }

    fn value(&self, entry: &LedgerEntry) -> String {
        match self {
            Self::Date => entry.date.clone(),
            Self::TodaySales => entry.today_sales.to_string(),
            Self::BoxActual => entry.box_actual.to_string(),
            Self::PrevChange => entry.prev_change.to_string(),
            Self::TakenSaving => entry.taken_saving.to_string(),
            Self::LeftOver => entry.left_over.to_string(),
            Self::ExpectedBox => entry.expected_box.to_string(),
            Self::Variance => entry.variance.to_string(),
        }
    }

    fn assign(&self, entry: &mut LedgerEntry, raw: &str) {
        let slot = match self {
            Self::Date => {
                entry.date = raw.to_string();
                return;
            }
            Self::TodaySales => &mut entry.today_sales,
            Self::BoxActual => &mut entry.box_actual,
            Self::PrevChange => &mut entry.prev_change,
            Self::TakenSaving => &mut entry.taken_saving,
            Self::LeftOver => &mut entry.left_over,
            Self::ExpectedBox => &mut entry.expected_box,
            Self::Variance => &mut entry.variance,
        };
        *slot = parse_int(raw);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Leading integer of a cell, like `parseInt`: optional sign then digits.
/// Anything unparseable is zero.
pub fn parse_int(raw: &str) -> Amount {
    let s = raw.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: Amount = digits[..end].parse().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("sales_data_{}.csv", today.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// encode / decode
// ---------------------------------------------------------------------------

/// Serialize the ledger as CSV with amounts as plain integer minor units.
pub fn encode(entries: &[LedgerEntry]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(COLUMNS.iter().map(|c| c.label()))?;
    for entry in entries {
        wtr.write_record(COLUMNS.iter().map(|c| c.value(entry)))?;
    }
    let bytes = wtr.into_inner().map_err(|e| TillError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| TillError::Other(e.to_string()))
}

/// Parse CSV text into candidate entries.
///
/// The first line names the columns; every later line is one entry, with
/// values mapped onto the columns by position. There is no quoting: a `"` is
/// an ordinary character. Unknown columns are ignored, and missing or
/// non-numeric amounts become zero, so a blank line in the middle of the file
/// yields an all-zero entry. Only blank input is an error.
pub fn decode(text: &str) -> Result<Vec<LedgerEntry>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TillError::EmptyFile);
    }
    let mut lines = text.lines();
    let header = lines.next().ok_or(TillError::EmptyFile)?;
    let columns: Vec<Option<Column>> = split_line(header)?
        .iter()
        .map(Column::from_label)
        .collect();

    let mut entries = Vec::new();
    for line in lines {
        let record = split_line(line)?;
        let mut entry = LedgerEntry::default();
        for (i, column) in columns.iter().enumerate() {
            let Some(column) = column else { continue };
            column.assign(&mut entry, record.get(i).unwrap_or(""));
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Cells of a single line, split on commas with quoting turned off.
fn split_line(line: &str) -> Result<csv::StringRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    // A blank line reads as no record; keep it as an empty one.
    rdr.read_record(&mut record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "date,todaySales,boxActual,prevChange,takenSaving,leftOver,expectedBox,variance";

    fn sample() -> Vec<LedgerEntry> {
        vec![
            LedgerEntry {
                date: "2025-01-15".into(),
                prev_change: 500,
                today_sales: 1000,
                box_actual: 1500,
                taken_saving: 200,
                left_over: 1300,
                expected_box: 1500,
                variance: 0,
            },
            LedgerEntry {
                date: "2025-01-16".into(),
                prev_change: 1300,
                today_sales: 2500000,
                box_actual: 2501200,
                taken_saving: 2500000,
                left_over: 1200,
                expected_box: 2501300,
                variance: -100,
            },
        ]
    }

    #[test]
    fn test_encode_layout() {
        let text = encode(&sample()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "2025-01-15,1000,1500,500,200,1300,1500,0");
        assert_eq!(lines[2], "2025-01-16,2500000,2501200,1300,2500000,1200,2501300,-100");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_encode_empty_ledger_is_header_only() {
        assert_eq!(encode(&[]).unwrap(), format!("{HEADER}\n"));
    }

    #[test]
    fn test_roundtrip() {
        let entries = sample();
        assert_eq!(decode(&encode(&entries).unwrap()).unwrap(), entries);
    }

    #[test]
    fn test_decode_quote_characters_stay_line_based() {
        let text = format!(
            "{HEADER}\n\"2025-01-01,1,1,0,0,1,1,0\n2025-01-02,2,2,0,0,2,2,0\n2025-01-03,3\",3,0,0,3,3,0\n"
        );
        let entries = decode(&text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].date, "\"2025-01-01");
        assert_eq!(entries[0].today_sales, 1);
        assert_eq!(entries[1].date, "2025-01-02");
        assert_eq!(entries[1].left_over, 2);
        assert_eq!(entries[2].today_sales, 3);
        assert_eq!(entries[2].box_actual, 3);
    }

    #[test]
    fn test_decode_one_entry_per_line_with_odd_cells() {
        let rows = [
            "2025-04-01,10,10,0,0,10,10,0",
            "\"",
            "2025-04-03,\"5\",7",
            "'quoted',x,,,,,,",
            "2025-04-05,1,2,3,4,5,6,7,8,9,\"\"",
            "\"2025-04-06\"",
        ];
        let text = format!("{HEADER}\n{}\n", rows.join("\n"));
        let entries = decode(&text).unwrap();
        assert_eq!(entries.len(), rows.len());
        assert_eq!(entries[2].date, "2025-04-03");
        assert_eq!(entries[2].today_sales, 0);
        assert_eq!(entries[2].box_actual, 7);
        assert_eq!(entries[4].variance, 7);
    }

    #[test]
    fn test_decode_blank_middle_line_is_zero_entry() {
        let text = format!("{HEADER}\n2025-05-01,4,4,0,0,4,4,0\n\n2025-05-03,6,6,0,0,6,6,0\n\n");
        let entries = decode(&text).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], LedgerEntry::default());
        assert_eq!(entries[2].date, "2025-05-03");
    }

    #[test]
    fn test_encode_never_quotes() {
        let entries = vec![LedgerEntry {
            date: "2025 \"x\"".into(),
            ..Default::default()
        }];
        let text = encode(&entries).unwrap();
        assert_eq!(text.lines().nth(1), Some("2025 \"x\",0,0,0,0,0,0,0"));
    }

    #[test]
    fn test_decode_crlf() {
        let text = format!("{HEADER}\r\n2025-02-01,10,10,0,5,5,10,0\r\n");
        let entries = decode(&text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2025-02-01");
        assert_eq!(entries[0].left_over, 5);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(decode(""), Err(TillError::EmptyFile)));
        assert!(matches!(decode("  \n \n"), Err(TillError::EmptyFile)));
    }

    #[test]
    fn test_decode_non_numeric_defaults_to_zero() {
        let text = format!("{HEADER}\n2025-02-01,100,100,0,oops,100,100,0\n");
        let entries = decode(&text).unwrap();
        assert_eq!(entries[0].taken_saving, 0);
        assert_eq!(entries[0].today_sales, 100);
    }

    #[test]
    fn test_decode_uses_header_positions() {
        let text = "leftOver,date,notes,todaySales\n40,2025-03-01,hello,900\n";
        let entries = decode(text).unwrap();
        assert_eq!(entries[0].date, "2025-03-01");
        assert_eq!(entries[0].left_over, 40);
        assert_eq!(entries[0].today_sales, 900);
        assert_eq!(entries[0].box_actual, 0);
    }

    #[test]
    fn test_decode_short_and_long_rows() {
        let text = format!("{HEADER}\n2025-03-01,5\n2025-03-02,1,2,3,4,5,6,7,8,9\n");
        let entries = decode(&text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].today_sales, 5);
        assert_eq!(entries[0].variance, 0);
        assert_eq!(entries[1].variance, 7);
    }

    #[test]
    fn test_decode_header_only() {
        assert!(decode(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("1300"), 1300);
        assert_eq!(parse_int(" -100 "), -100);
        assert_eq!(parse_int("1300.00"), 1300);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("99999999999999999999"), 0);
    }

    #[test]
    fn test_export_filename() {
        let d = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(export_filename(d), "sales_data_2025-07-04.csv");
    }

    #[test]
    fn test_column_labels() {
        let header: Vec<&str> = COLUMNS.iter().map(|c| c.label()).collect();
        assert_eq!(header.join(","), HEADER);
        assert_eq!(Column::from_label("takenSaving"), Some(Column::TakenSaving));
        assert_eq!(Column::from_label("TakenSaving"), None);
    }
}
