// Amount and date parsing for loosely formatted sheet cells.
// Nothing here fails: unreadable values come back as None.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::cell::Cell;
use crate::locale::Locale;

const CURRENCY_CODES: &[&str] = &["EUR", "USD", "CHF", "GBP"];
const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£', '¥', '₣'];

/// Spreadsheet serial day 0.
fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("serial epoch is a valid date")
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

impl Locale {
    /// Parse an amount, returning `None` for blank or unreadable cells.
    ///
    /// Numbers pass through. Text loses currency markers and whitespace,
    /// thousands separators are dropped and the decimal separator becomes
    /// `.`. Accounting negatives `(12,50)` and trailing-minus `12,50-` are
    /// understood.
    pub fn try_parse_amount(&self, cell: &Cell) -> Option<f64> {
        match cell {
            Cell::Empty => None,
            Cell::Number(n) => n.is_finite().then_some(*n),
            Cell::Text(s) => self.parse_amount_text(s),
        }
    }

    /// Amount or 0 when unreadable.
    pub fn parse_amount(&self, cell: &Cell) -> f64 {
        self.try_parse_amount(cell).unwrap_or(0.0)
    }

    fn parse_amount_text(&self, raw: &str) -> Option<f64> {
        let mut s = raw.trim().to_string();
        for code in CURRENCY_CODES {
            s = s.replace(code, "");
        }
        if !self.currency_symbol.is_empty() {
            s = s.replace(self.currency_symbol.as_str(), "");
        }

        let mut cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
            .filter(|c| *c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        let mut negative = false;
        if cleaned.starts_with('(') && cleaned.ends_with(')') && cleaned.len() > 2 {
            negative = true;
            cleaned = cleaned[1..cleaned.len() - 1].to_string();
        } else if cleaned.len() > 1 && cleaned.ends_with('-') && !cleaned.starts_with('-') {
            negative = true;
            cleaned.pop();
        }

        if cleaned.is_empty() {
            return None;
        }

        let value: f64 = cleaned.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(if negative { -value } else { value })
    }
}

/// Amount under the default locale, 0 when unreadable.
pub fn parse_amount(cell: &Cell) -> f64 {
    Locale::default().parse_amount(cell)
}

/// Convenience for raw strings, as typed into a sheet.
pub fn parse_amount_str(raw: &str) -> f64 {
    parse_amount(&Cell::from(raw))
}

/// Round to integer minor units (cents).
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

fn day_first_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})\b").expect("day-first date pattern is valid")
    })
}

/// Parse a date cell.
///
/// Numbers are spreadsheet serials (days since 1899-12-30, time of day
/// ignored). Text is tried as `DD.MM.YYYY` first, then as ISO and a few
/// common generic layouts.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => serial_to_date(*n),
        Cell::Text(s) => parse_date_text(s.trim()),
    }
}

pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial.abs() > 2_958_465.0 {
        return None;
    }
    serial_epoch().checked_add_signed(Duration::days(serial.floor() as i64))
}

pub fn date_to_serial(date: NaiveDate) -> f64 {
    (date - serial_epoch()).num_days() as f64
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = day_first_pattern().captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_generic_date(s)
}

fn parse_generic_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}
