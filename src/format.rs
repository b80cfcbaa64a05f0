//! Locale-aware number, percent and date formatting.
//!
//! Amounts always carry 2 decimals and the locale grouping separator.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::round_half_away;
use crate::error::ReportError;
use crate::i18n::{Language, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    FrCh,
    DeCh,
    FrFr,
    DeDe,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::EnUs,
        Locale::EnGb,
        Locale::FrCh,
        Locale::DeCh,
        Locale::FrFr,
        Locale::DeDe,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::FrCh => "fr-CH",
            Locale::DeCh => "de-CH",
            Locale::FrFr => "fr-FR",
            Locale::DeDe => "de-DE",
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnGb | Locale::DeCh => '.',
            Locale::FrCh | Locale::FrFr | Locale::DeDe => ',',
        }
    }

    pub fn grouping_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnGb => ',',
            Locale::FrCh | Locale::DeCh => '\'',
            Locale::FrFr => ' ',
            Locale::DeDe => '.',
        }
    }

    /// `chrono` pattern for short dates.
    pub fn date_pattern(self) -> &'static str {
        match self {
            Locale::EnUs => "%m/%d/%Y",
            Locale::EnGb | Locale::FrFr => "%d/%m/%Y",
            Locale::FrCh | Locale::DeCh | Locale::DeDe => "%d.%m.%Y",
        }
    }

    pub fn language(self) -> Language {
        match self {
            Locale::EnUs | Locale::EnGb => Language::English,
            Locale::FrCh | Locale::FrFr => Language::French,
            Locale::DeCh | Locale::DeDe => Language::German,
        }
    }

    fn percent_suffix(self) -> &'static str {
        match self.language() {
            Language::English => "%",
            Language::French | Language::German => " %",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ReportError::UnknownLocale(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.code().to_string()
    }
}

/// Formats values for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    locale: Locale,
}

impl Formatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Amount with 2 decimals and grouping, e.g. `1,234.50`.
    pub fn amount(&self, value: f64) -> String {
        self.number(value, 2)
    }

    /// Integer with grouping, e.g. `12,345`.
    pub fn integer(&self, value: i64) -> String {
        self.group(&value.unsigned_abs().to_string(), value < 0)
    }

    pub fn count(&self, value: usize) -> String {
        self.integer(value as i64)
    }

    /// A fraction as a percentage, `0.3043` → `30.43%`.
    pub fn percent(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return String::new();
        }
        format!("{}{}", self.number(value * 100.0, decimals), self.locale.percent_suffix())
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(self.locale.date_pattern()).to_string()
    }

    /// Month name and year, e.g. `March 2024`.
    pub fn month(&self, year: i32, month: u32) -> String {
        let translator = Translator::new(self.locale.language());
        format!("{} {}", translator.month_name(month), year)
    }

    pub fn month_of(&self, date: NaiveDate) -> String {
        self.month(date.year(), date.month())
    }

    /// Number with `decimals` decimals and grouping.
    pub fn number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let rounded = format!("{:.*}", decimals, round_half_away(value, decimals));
        let negative = rounded.starts_with('-');
        let unsigned = rounded.trim_start_matches('-');
        let (whole, frac) = match unsigned.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (unsigned, None),
        };

        // "-0.00" prints as "0.00"
        let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');
        let mut out = self.group(whole, negative && !is_zero);
        if let Some(frac) = frac {
            out.push(self.locale.decimal_separator());
            out.push_str(frac);
        }
        out
    }

    fn group(&self, digits: &str, negative: bool) -> String {
        let separator = self.locale.grouping_separator();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, ch) in digits.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        let mut grouped: String = out.chars().rev().collect();
        if negative {
            grouped.insert(0, '-');
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_grouping_en() {
        let fmt = Formatter::new(Locale::EnUs);
        assert_eq!(fmt.amount(1234567.891), "1,234,567.89");
        assert_eq!(fmt.amount(0.0), "0.00");
        assert_eq!(fmt.amount(-1234.5), "-1,234.50");
        assert_eq!(fmt.amount(-0.001), "0.00");
        assert_eq!(fmt.amount(999.999), "1,000.00");
    }

    #[test]
    fn test_amount_rounds_half_away_from_zero() {
        let fmt = Formatter::new(Locale::EnUs);
        assert_eq!(fmt.amount(2.005), "2.01");
        assert_eq!(fmt.amount(0.125), "0.13");
        assert_eq!(fmt.amount(-0.125), "-0.13");
        assert_eq!(fmt.number(2.5, 0), "3");
        assert_eq!(fmt.percent(0.00125, 2), "0.13%");
    }

    #[test]
    fn test_amount_swiss() {
        let fmt = Formatter::new(Locale::FrCh);
        assert_eq!(fmt.amount(1234.5), "1'234,50");
        let fmt = Formatter::new(Locale::DeCh);
        assert_eq!(fmt.amount(1234.5), "1'234.50");
        let fmt = Formatter::new(Locale::DeDe);
        assert_eq!(fmt.amount(1234567.5), "1.234.567,50");
    }

    #[test]
    fn test_percent() {
        let fmt = Formatter::new(Locale::EnUs);
        assert_eq!(fmt.percent(300.0 / 230.0 - 1.0, 2), "30.43%");
        assert_eq!(fmt.percent(0.1, 0), "10%");
        assert_eq!(Formatter::new(Locale::FrCh).percent(0.125, 1), "12,5 %");
        assert_eq!(fmt.percent(f64::NAN, 2), "");
    }

    #[test]
    fn test_integer_and_dates() {
        let fmt = Formatter::new(Locale::EnUs);
        assert_eq!(fmt.integer(1234567), "1,234,567");
        assert_eq!(fmt.integer(-12), "-12");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(fmt.date(date), "03/05/2024");
        assert_eq!(Formatter::new(Locale::FrCh).date(date), "05.03.2024");
        assert_eq!(fmt.month_of(date), "March 2024");
        assert_eq!(Formatter::new(Locale::FrCh).month_of(date), "mars 2024");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("fr_CH".parse::<Locale>().unwrap(), Locale::FrCh);
        assert_eq!("EN-us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("xx-YY".parse::<Locale>().is_err());
    }
}
