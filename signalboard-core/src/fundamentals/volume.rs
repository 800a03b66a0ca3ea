//! Traded volume series.

use crate::data::read_series;
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::workbook::Sheet;
use chrono::NaiveDate;

/// The security's volume column dated on or after `since`.
pub fn read_volume(
    sheet: &Sheet,
    date_column: &str,
    security: &str,
    since: Option<NaiveDate>,
) -> Result<PriceSeries, AnalysisError> {
    let series = read_series(sheet, date_column, security)?;
    Ok(match since {
        Some(start) => series.since(start),
        None => series,
    })
}
