use crate::error::{Result, TillError};
use crate::models::Amount;

pub const DEFAULT_SYMBOL: &str = "\u{20b9}";

/// Converts between display text and exact integer minor-unit amounts.
///
/// `decimal_digits` is either 0 (every amount is a whole unit) or 2 (amounts
/// carry hundredths, e.g. rupees and paise). One codec is built from settings
/// and shared by every caller so the two precisions never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    decimal_digits: u32,
    symbol: String,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            decimal_digits: 0,
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

impl Codec {
    pub fn new(decimal_digits: u32, symbol: &str) -> Result<Self> {
        if decimal_digits != 0 && decimal_digits != 2 {
            return Err(TillError::Settings(format!(
                "decimal_digits must be 0 or 2, got {decimal_digits}"
            )));
        }
        Ok(Self {
            decimal_digits,
            symbol: symbol.to_string(),
        })
    }

    pub fn decimal_digits(&self) -> u32 {
        self.decimal_digits
    }

    fn scale(&self) -> i64 {
        10i64.pow(self.decimal_digits)
    }

    /// Parse operator input into minor units. `None` means "not a number".
    ///
    /// Blank input is zero. A leading `-` is rejected rather than negated.
    pub fn parse(&self, text: &str) -> Option<Amount> {
        let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
        let s = cleaned.trim();
        if s.is_empty() {
            return Some(0);
        }
        if s.starts_with('-') {
            return None;
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (s, None),
        };
        if !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let units: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut amount = units.checked_mul(self.scale())?;

        if let Some(frac) = frac {
            if !frac.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let digits = self.decimal_digits as usize;
            if digits > 0 {
                let mut significant: String = frac.chars().take(digits).collect();
                while significant.len() < digits {
                    significant.push('0');
                }
                amount = amount.checked_add(significant.parse().ok()?)?;
            }
        }
        Some(amount)
    }

    /// Render an amount with lakh/crore digit grouping: 12,34,567
    pub fn format(&self, amount: Amount) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        let body = self.format_abs(amount);
        format!("{sign}{body}")
    }

    /// Not-a-number renders as an empty string.
    pub fn display(&self, amount: Option<Amount>) -> String {
        amount.map(|a| self.format(a)).unwrap_or_default()
    }

    /// Format with the currency symbol: ₹12,34,567 / -₹100
    pub fn money(&self, amount: Amount) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        format!("{sign}{}{}", self.symbol, self.format_abs(amount))
    }

    fn format_abs(&self, amount: Amount) -> String {
        let abs = amount.unsigned_abs();
        let scale = self.scale().unsigned_abs();
        let grouped = group_lakh(&(abs / scale).to_string());
        if self.decimal_digits == 0 {
            grouped
        } else {
            let width = self.decimal_digits as usize;
            format!("{grouped}.{:0width$}", abs % scale)
        }
    }
}

fn group_lakh(digits: &str) -> String {
    let mut out = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
