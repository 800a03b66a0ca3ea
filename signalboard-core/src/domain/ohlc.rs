//! OHLC rows: one trading day of a single security, joined from four sheets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Open/high/low/close quotes for a single security on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcRow {
    /// Returns true if any quote is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// `low <= high`, and both open and close lie within `[low, high]`.
    pub fn is_consistent(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.low <= self.high
            && self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
    }
}

/// Date-ordered OHLC rows for one security.
///
/// Only rows passing [`OhlcRow::is_consistent`] are stored; the aligner
/// counts the rest in `excluded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcFrame {
    pub security: String,
    pub rows: Vec<OhlcRow>,
    /// Joined rows dropped because they broke the OHLC ordering.
    pub excluded: usize,
}

impl OhlcFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.low).collect()
    }

    /// Latest row, if any.
    pub fn last(&self) -> Option<&OhlcRow> {
        self.rows.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}
