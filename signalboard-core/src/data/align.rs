//! Time-series alignment: four quote sheets → one OHLC frame per security.
//!
//! Close/open/high/low are inner-joined on date. A joined row needs a value
//! in all four sheets. Rows breaking the OHLC ordering are excluded (and
//! counted), never repaired; no zero or placeholder is ever substituted.

use super::series::read_series;
use crate::config::SheetNames;
use crate::domain::{OhlcFrame, OhlcRow, PriceSeries};
use crate::error::AnalysisError;
use crate::workbook::Workbook;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Inner-join four series on date, keep consistent rows dated on or after `since`.
pub fn align_ohlc(
    security: &str,
    close: &PriceSeries,
    open: &PriceSeries,
    high: &PriceSeries,
    low: &PriceSeries,
    since: Option<NaiveDate>,
) -> OhlcFrame {
    let mut rows = Vec::new();
    let mut excluded = 0;

    for point in close.points() {
        if since.is_some_and(|start| point.date < start) {
            continue;
        }
        let joined = (
            point.value,
            open.value_at(point.date),
            high.value_at(point.date),
            low.value_at(point.date),
        );
        let (Some(c), Some(o), Some(h), Some(l)) = joined else {
            continue;
        };

        let row = OhlcRow {
            date: point.date,
            open: o,
            high: h,
            low: l,
            close: c,
        };
        if row.is_consistent() {
            rows.push(row);
        } else {
            excluded += 1;
        }
    }

    OhlcFrame {
        security: security.to_string(),
        rows,
        excluded,
    }
}

/// Read the four quote sheets for `security` and align them.
///
/// A sheet or column missing for the security is reported as an error
/// naming it; the frame is never built from partial data.
pub fn align_security(
    workbook: &Workbook,
    sheets: &SheetNames,
    security: &str,
    since: Option<NaiveDate>,
) -> Result<OhlcFrame, AnalysisError> {
    let read = |sheet_name: &str| -> Result<PriceSeries, AnalysisError> {
        let sheet = workbook.sheet(sheet_name)?;
        read_series(sheet, &sheets.date_column, security)
    };

    let close = read(&sheets.close)?;
    let open = read(&sheets.open)?;
    let high = read(&sheets.high)?;
    let low = read(&sheets.low)?;

    let frame = align_ohlc(security, &close, &open, &high, &low, since);
    if frame.excluded > 0 {
        warn!(
            security,
            excluded = frame.excluded,
            "rows with inconsistent OHLC excluded"
        );
    }
    debug!(security, rows = frame.len(), "aligned OHLC frame");
    Ok(frame)
}
