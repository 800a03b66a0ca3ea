//! Market indices associated with a security.
//!
//! The `INDICES` sheet lists, under each security's column, the names of
//! the indices it belongs to. Index price histories live in `COURS` next to
//! the securities.

use crate::data::read_series;
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::workbook::Sheet;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Security vs. its indices, over the window where every index has data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexComparison {
    /// Latest first-valid date across the security window and the indices.
    pub start: Option<NaiveDate>,
    pub security: PriceSeries,
    pub indices: Vec<PriceSeries>,
    /// Listed indices with no column in the price sheet.
    pub missing: Vec<String>,
}

/// Non-empty index names under `security` in the indices sheet, in sheet order.
pub fn index_list(sheet: &Sheet, security: &str) -> Result<Vec<String>, AnalysisError> {
    let col = sheet.column_index(security)?;
    Ok(sheet
        .column_cells(col)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// Align the security with its indices.
///
/// The window starts at the first date of the security's series (dated on or
/// after `since`), pushed forward to the first defined value of any listed
/// index that starts later. Indices with no defined value in the window do
/// not move the start.
pub fn compare_with_indices(
    prices: &Sheet,
    date_column: &str,
    security: &str,
    indices: &[String],
    since: Option<NaiveDate>,
) -> Result<IndexComparison, AnalysisError> {
    let window = |series: PriceSeries| match since {
        Some(start) => series.since(start),
        None => series,
    };

    let security_series = window(read_series(prices, date_column, security)?);

    let mut present = Vec::new();
    let mut missing = Vec::new();
    for name in indices {
        if prices.has_column(name) {
            present.push(window(read_series(prices, date_column, name)?));
        } else {
            missing.push(name.clone());
        }
    }

    let base = security_series.points().first().map(|p| p.date);
    let start = present
        .iter()
        .filter_map(PriceSeries::first_valid_date)
        .fold(base, |acc, d| Some(acc.map_or(d, |a| a.max(d))));

    let (security_series, present): (PriceSeries, Vec<PriceSeries>) = match start {
        Some(start) => (
            security_series.since(start),
            present.iter().map(|s| s.since(start)).collect(),
        ),
        None => (security_series, present),
    };

    debug!(
        security,
        indices = present.len(),
        missing = missing.len(),
        ?start,
        "index comparison aligned"
    );

    Ok(IndexComparison {
        start,
        security: security_series,
        indices: present,
        missing,
    })
}

/// Full price history of one index from its first defined value.
pub fn index_history(
    prices: &Sheet,
    date_column: &str,
    index: &str,
) -> Result<PriceSeries, AnalysisError> {
    let series = read_series(prices, date_column, index)?;
    let start = series
        .first_valid_date()
        .ok_or_else(|| AnalysisError::NoPriceData {
            security: index.to_string(),
        })?;
    Ok(series.since(start))
}
