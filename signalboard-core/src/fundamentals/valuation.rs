//! Valuation methods and their recommendation against the market price.

use crate::domain::{Action, Signal, SignalValue, ValuationEstimate};
use crate::error::AnalysisError;
use crate::workbook::Sheet;

/// Estimates for `security` from the last `rows` data rows of the
/// valuation sheet. Non-numeric cells are skipped.
pub fn read_estimates(
    sheet: &Sheet,
    security: &str,
    rows: usize,
) -> Result<Vec<ValuationEstimate>, AnalysisError> {
    let col = sheet.column_index(security)?;
    let data = sheet.data_rows();
    let tail = &data[data.len().saturating_sub(rows)..];

    Ok(tail
        .iter()
        .filter_map(|row| {
            let estimated_value = row.get(col)?.as_f64()?;
            let method_name = row.first()?.to_string().trim().to_string();
            Some(ValuationEstimate {
                method_name,
                estimated_value,
            })
        })
        .collect())
}

/// Buy when the estimate exceeds the price, Sell when below, Neutral if equal.
pub fn classify_estimates(estimates: &[ValuationEstimate], price: f64) -> Vec<Signal> {
    estimates
        .iter()
        .map(|e| {
            Signal::new(
                e.method_name.clone(),
                SignalValue::number(e.estimated_value),
                Action::above_is_buy(e.estimated_value, price),
            )
        })
        .collect()
}
