//! Per-security analysis report.
//!
//! Every panel is computed independently and stored as ready-or-unavailable,
//! so one missing sheet or column never hides the other panels.

use crate::domain::{OhlcFrame, PriceSeries, Signal, SignalSummary, WorkbookHash};
use crate::error::AnalysisError;
use crate::fundamentals::{CompanyProfile, IndexComparison, Informations, ShareholderBreakdown};
use crate::indicators::IndicatorValues;
use chrono::NaiveDate;
use serde::Serialize;

/// Outcome of one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    Unavailable(AnalysisError),
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(v) => Some(v),
            Panel::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            Panel::Ready(_) => None,
            Panel::Unavailable(e) => Some(e),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }
}

impl<T> From<Result<T, AnalysisError>> for Panel<T> {
    fn from(result: Result<T, AnalysisError>) -> Self {
        match result {
            Ok(v) => Panel::Ready(v),
            Err(e) => Panel::Unavailable(e),
        }
    }
}

/// Aligned prices, indicator series and the signal table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalAnalysis {
    pub frame: OhlcFrame,
    pub indicators: IndicatorValues,
    pub last_price: f64,
    pub signals: Vec<Signal>,
    pub summary: SignalSummary,
}

impl TechnicalAnalysis {
    /// Rows dropped for breaking the OHLC ordering.
    pub fn excluded_rows(&self) -> usize {
        self.frame.excluded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexHistory {
    pub index: String,
    pub history: Panel<PriceSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicesPanel {
    pub indices: Vec<String>,
    /// Absent when the security lists no index.
    pub comparison: Option<Panel<IndexComparison>>,
    pub histories: Vec<IndexHistory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationPanel {
    pub price: f64,
    pub price_date: NaiveDate,
    pub signals: Vec<Signal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityReport {
    pub security: String,
    pub workbook: WorkbookHash,
    pub technical: Panel<TechnicalAnalysis>,
    pub volume: Panel<PriceSeries>,
    pub indices: Panel<IndicesPanel>,
    pub profile: Panel<CompanyProfile>,
    pub informations: Panel<Informations>,
    pub shareholders: Panel<ShareholderBreakdown>,
    pub valuation: Panel<ValuationPanel>,
}

impl SecurityReport {
    /// Names and errors of the panels that could not be built.
    pub fn unavailable(&self) -> Vec<(&'static str, &AnalysisError)> {
        [
            ("technical", self.technical.error()),
            ("volume", self.volume.error()),
            ("indices", self.indices.error()),
            ("profile", self.profile.error()),
            ("informations", self.informations.error()),
            ("shareholders", self.shareholders.error()),
            ("valuation", self.valuation.error()),
        ]
        .into_iter()
        .filter_map(|(name, err)| err.map(|e| (name, e)))
        .collect()
    }
}
