use chrono::NaiveDate;

use crate::models::{Amount, LedgerEntry};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub sales: Amount,
    pub box_actual: Amount,
    pub count: usize,
}

pub fn totals(entries: &[LedgerEntry]) -> Totals {
    entries.iter().fold(Totals::default(), |acc, e| Totals {
        sales: acc.sales.saturating_add(e.today_sales),
        box_actual: acc.box_actual.saturating_add(e.box_actual),
        count: acc.count + 1,
    })
}

// ---------------------------------------------------------------------------
// Calendar buckets
// ---------------------------------------------------------------------------

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub struct SalesBucket {
    pub label: String,
    pub total: Amount,
}

/// Sales per month of `year`, always twelve buckets. Undated entries are skipped.
pub fn monthly_sales(entries: &[LedgerEntry], year: i32) -> Vec<SalesBucket> {
    let mut sums = [0 as Amount; 12];
    for entry in entries {
        if let Some((y, m, _)) = entry.ymd() {
            if y == year {
                let slot = &mut sums[(m - 1) as usize];
                *slot = slot.saturating_add(entry.today_sales);
            }
        }
    }
    MONTH_LABELS
        .iter()
        .zip(sums)
        .map(|(label, total)| SalesBucket {
            label: label.to_string(),
            total,
        })
        .collect()
}

/// Sales per calendar day of one month. Empty for an impossible month.
pub fn daily_sales(entries: &[LedgerEntry], year: i32, month: u32) -> Vec<SalesBucket> {
    let days = days_in_month(year, month);
    let mut sums = vec![0 as Amount; days as usize];
    for entry in entries {
        if let Some((y, m, d)) = entry.ymd() {
            if y == year && m == month {
                let slot = &mut sums[(d - 1) as usize];
                *slot = slot.saturating_add(entry.today_sales);
            }
        }
    }
    sums.into_iter()
        .enumerate()
        .map(|(i, total)| SalesBucket {
            label: (i + 1).to_string(),
            total,
        })
        .collect()
}

pub fn month_total(entries: &[LedgerEntry], year: i32, month: u32) -> Amount {
    entries
        .iter()
        .filter(|e| matches!(e.ymd(), Some((y, m, _)) if y == year && m == month))
        .fold(0, |acc: Amount, e| acc.saturating_add(e.today_sales))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map_or(31, |n| (n - first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, sales: Amount) -> LedgerEntry {
        LedgerEntry {
            date: date.into(),
            today_sales: sales,
            box_actual: sales + 10,
            ..Default::default()
        }
    }

    fn seed() -> Vec<LedgerEntry> {
        vec![
            entry("2024-12-31", 999),
            entry("2025-01-05", 100),
            entry("2025-01-20", 250),
            entry("2025-03-01", 40),
            entry("2025-03-01", 60),
            entry("garbage", 5000),
        ]
    }

    #[test]
    fn test_totals() {
        let t = totals(&seed());
        assert_eq!(t.sales, 999 + 100 + 250 + 40 + 60 + 5000);
        assert_eq!(t.box_actual, t.sales + 60);
        assert_eq!(t.count, 6);
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn test_monthly_sales() {
        let months = monthly_sales(&seed(), 2025);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].label, "Jan");
        assert_eq!(months[0].total, 350);
        assert_eq!(months[1].total, 0);
        assert_eq!(months[2].total, 100);
        assert_eq!(months[11].total, 0);

        let prior = monthly_sales(&seed(), 2024);
        assert_eq!(prior[11].total, 999);
    }

    #[test]
    fn test_daily_sales() {
        let days = daily_sales(&seed(), 2025, 3);
        assert_eq!(days.len(), 31);
        assert_eq!(days[0].label, "1");
        assert_eq!(days[0].total, 100);
        assert_eq!(days[1].total, 0);

        assert_eq!(daily_sales(&[], 2024, 2).len(), 29);
        assert_eq!(daily_sales(&[], 2025, 2).len(), 28);
        assert!(daily_sales(&[], 2025, 13).is_empty());
    }

    #[test]
    fn test_month_total() {
        assert_eq!(month_total(&seed(), 2025, 1), 350);
        assert_eq!(month_total(&seed(), 2025, 2), 0);
        assert_eq!(month_total(&seed(), 2024, 12), 999);
    }
}
