//! Column extraction: one security's column of a dated sheet as a `PriceSeries`.

use crate::domain::{PriceSeries, SeriesPoint};
use crate::error::AnalysisError;
use crate::workbook::Sheet;

/// Read `column` of a sheet with a date column into a series.
///
/// Rows whose date cell is empty or unparseable are dropped. Non-numeric
/// value cells become missing values, never zero.
pub fn read_series(
    sheet: &Sheet,
    date_column: &str,
    column: &str,
) -> Result<PriceSeries, AnalysisError> {
    let date_idx = sheet.column_index(date_column)?;
    let value_idx = sheet.column_index(column)?;

    let points = sheet
        .data_rows()
        .iter()
        .filter_map(|row| {
            let date = row.get(date_idx)?.as_date()?;
            let value = row.get(value_idx).and_then(|c| c.as_f64());
            Some(SeriesPoint { date, value })
        })
        .collect();

    Ok(PriceSeries::new(column, points))
}
