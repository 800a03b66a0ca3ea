//! Workbook model: named sheets of raw cells, parsed once per load.
//!
//! A `Workbook` is immutable once built. Sheets keep row 0 as a raw row so
//! both headed sheets (`COURS`, `Profil`, ...) and header-less sheets (the
//! per-security shareholder sheets) can be read from the same value.

pub mod cell;
pub mod loader;

pub use cell::{excel_serial_to_date, parse_date, Cell};
pub use loader::{load_csv_dir, WorkbookError};

use crate::domain::WorkbookHash;
use crate::error::AnalysisError;
use std::collections::BTreeMap;
use std::path::Path;

static EMPTY_CELL: Cell = Cell::Empty;

/// One sheet: a ragged grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a sheet from string rows (row 0 = header). Handy for fixtures.
    pub fn from_strings(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|s| Cell::parse(s)).collect())
            .collect();
        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Row 0 rendered as text.
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Index of the first header equal to `name` (after trimming).
    pub fn column_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.find_column(name)
            .ok_or_else(|| AnalysisError::missing_column(&self.name, name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.find_column(name).is_some()
    }

    fn find_column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.rows
            .first()?
            .iter()
            .position(|c| c.to_string().trim() == wanted)
    }

    /// Data-row cells of one column, header excluded.
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.data_rows()
            .iter()
            .map(move |r| r.get(col).unwrap_or(&EMPTY_CELL))
    }
}

/// A loaded workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    sheets: BTreeMap<String, Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets: sheets
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }

    /// Load a workbook exported as one CSV file per sheet.
    pub fn open(dir: &Path) -> Result<Self, WorkbookError> {
        load_csv_dir(dir)
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet, AnalysisError> {
        self.sheets
            .get(name)
            .ok_or_else(|| AnalysisError::missing_sheet(name))
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Sheet names in sorted order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(|s| s.as_str()).collect()
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.values()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Content hash over sheet names and cell text.
    ///
    /// Unit (0x1f) and record (0x1e) separators keep `["ab", "c"]` and
    /// `["a", "bc"]` distinct.
    pub fn fingerprint(&self) -> WorkbookHash {
        let mut canonical = Vec::new();
        for sheet in self.sheets.values() {
            canonical.extend_from_slice(sheet.name.as_bytes());
            canonical.push(0x1d);
            for row in &sheet.rows {
                for cell in row {
                    canonical.extend_from_slice(cell.to_string().as_bytes());
                    canonical.push(0x1f);
                }
                canonical.push(0x1e);
            }
        }
        WorkbookHash::from_bytes(&canonical)
    }
}
