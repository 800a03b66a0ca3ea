//! Panel-level error taxonomy.
//!
//! Every variant names the sheet (and column or row) involved, so the
//! front-end can show a specific message for the one panel that failed.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("sheet '{sheet}' not found in workbook")]
    MissingSheet { sheet: String },

    #[error("column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error("malformed value '{value}' in sheet '{sheet}' at row {row}")]
    MalformedValue {
        sheet: String,
        row: usize,
        value: String,
    },

    #[error("no price data for '{security}'")]
    NoPriceData { security: String },
}

impl AnalysisError {
    pub fn missing_sheet(sheet: &str) -> Self {
        Self::MissingSheet {
            sheet: sheet.to_string(),
        }
    }

    pub fn missing_column(sheet: &str, column: &str) -> Self {
        Self::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        }
    }
}
