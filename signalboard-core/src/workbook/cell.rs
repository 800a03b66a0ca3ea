//! Raw cell values and their numeric/date interpretations.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Serial day numbers beyond this are not plausible spreadsheet dates (year 9999).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

impl Cell {
    /// Interpret raw text.
    ///
    /// Blank and `NaN` text become `Empty`. Numbers accept a lone decimal
    /// comma (`"12,5"`), except a comma followed by exactly three digits
    /// (`"1,234"`), which could be a thousands group and stays text.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, CommaRule::Guarded)
    }

    /// Interpret raw text from a `;`-delimited export, where a lone comma
    /// is always the decimal separator.
    pub fn parse_decimal_comma(raw: &str) -> Self {
        Self::parse_with(raw, CommaRule::Decimal)
    }

    fn parse_with(raw: &str, comma: CommaRule) -> Self {
        let trimmed = raw.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match parse_number(trimmed, comma) {
            Some(v) if v.is_nan() => Cell::Empty,
            Some(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Date interpretation: text in a known format, or an Excel serial day number.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Empty => None,
            Cell::Number(v) => excel_serial_to_date(*v),
            Cell::Text(s) => parse_date(s),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommaRule {
    /// Lone comma is decimal unless it may be a thousands group.
    Guarded,
    Decimal,
}

fn parse_number(s: &str, comma: CommaRule) -> Option<f64> {
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }
    let (whole, frac) = s.split_once(',')?;
    if frac.contains(',') || s.contains('.') {
        return None;
    }
    let thousands_like = frac.len() == 3 && frac.bytes().all(|b| b.is_ascii_digit());
    if comma == CommaRule::Guarded && thousands_like {
        return None;
    }
    format!("{whole}.{frac}").parse::<f64>().ok()
}

/// Parse a date from text in any accepted format.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Spreadsheet serial day number (day 0 = 1899-12-30) to a date.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}
