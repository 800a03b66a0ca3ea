//! Shareholder breakdown from a security's own sheet.
//!
//! The sheet has no header row. Holder names and percentages sit in two
//! fixed columns; any other content of the sheet is ignored.

use crate::error::AnalysisError;
use crate::workbook::{Cell, Sheet};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shareholder {
    pub name: String,
    pub percentage: f64,
}

/// Parsed holders plus the rows whose percentage could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShareholderBreakdown {
    pub holders: Vec<Shareholder>,
    pub rejected: Vec<AnalysisError>,
}

impl ShareholderBreakdown {
    pub fn total_percentage(&self) -> f64 {
        self.holders.iter().map(|h| h.percentage).sum()
    }
}

/// Percentage from a cell: numbers as-is, text with a decimal comma and an
/// optional trailing `%` normalized first.
pub fn normalize_percentage(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(v) => Some(*v),
        Cell::Text(s) => s
            .replace(',', ".")
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite()),
    }
}

/// A text label pair with no digit in the percentage cell, e.g.
/// `Actionnaire` / `Pourcentage`.
fn is_header_row(name: &Cell, pct: &Cell) -> bool {
    match (name, pct) {
        (Cell::Text(_), Cell::Text(label)) => !label.chars().any(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Read holder rows. Rows with either cell empty are skipped, and so is a
/// leading header row. A percentage that does not parse is rejected on its
/// own without dropping other rows.
pub fn read_shareholders(
    sheet: &Sheet,
    name_column: usize,
    percent_column: usize,
) -> ShareholderBreakdown {
    let mut breakdown = ShareholderBreakdown::default();
    let mut first_filled = true;

    for row in 0..sheet.row_count() {
        let name = sheet.cell(row, name_column);
        let pct = sheet.cell(row, percent_column);
        if name.is_empty() || pct.is_empty() {
            continue;
        }
        if std::mem::take(&mut first_filled) && is_header_row(name, pct) {
            debug!(sheet = sheet.name(), row = row + 1, "holder header row skipped");
            continue;
        }
        match normalize_percentage(pct) {
            Some(percentage) => breakdown.holders.push(Shareholder {
                name: name.to_string(),
                percentage,
            }),
            None => {
                warn!(sheet = sheet.name(), row = row + 1, value = %pct, "unreadable holding percentage");
                breakdown.rejected.push(AnalysisError::MalformedValue {
                    sheet: sheet.name().to_string(),
                    row: row + 1,
                    value: pct.to_string(),
                });
            }
        }
    }

    breakdown
}
