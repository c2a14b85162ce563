use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number and date conventions of the exported sheets.
///
/// Defaults to the German layout the exports use: `1.234,56 €` and
/// `DD.MM.YYYY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }
}

impl Locale {
    /// `1234.5` -> `1.234,50 €`
    pub fn format_amount(&self, value: f64) -> String {
        let number = self.format_number(value, 2);
        if self.currency_symbol.is_empty() {
            number
        } else {
            format!("{number} {}", self.currency_symbol)
        }
    }

    /// Fixed-decimal number with grouped thousands, without currency.
    pub fn format_number(&self, value: f64, decimals: usize) -> String {
        let formatted = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// `DD.MM.YYYY`
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%d.%m.%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_german_currency() {
        let locale = Locale::default();
        assert_eq!(locale.format_amount(1234.56), "1.234,56 €");
        assert_eq!(locale.format_amount(0.0), "0,00 €");
        assert_eq!(locale.format_amount(1_000_000.0), "1.000.000,00 €");
        assert_eq!(locale.format_amount(999.999), "1.000,00 €");
    }

    #[test]
    fn formats_negative_amounts() {
        let locale = Locale::default();
        assert_eq!(locale.format_amount(-50.5), "-50,50 €");
        // Rounds to zero: no negative sign
        assert_eq!(locale.format_amount(-0.001), "0,00 €");
    }

    #[test]
    fn formats_without_currency_symbol() {
        let locale = Locale {
            currency_symbol: String::new(),
            decimal_separator: '.',
            thousands_separator: ',',
        };
        assert_eq!(locale.format_amount(12345.5), "12,345.50");
    }

    #[test]
    fn formats_dates_day_first() {
        let locale = Locale::default();
        let d = NaiveDate::from_ymd_opt(2023, 10, 7).unwrap();
        assert_eq!(locale.format_date(d), "07.10.2023");
    }
}
