//! Indicator trait and named indicator series container.
//!
//! Indicators are pure functions: a price series in, a numeric series of
//! the same length out. They are computed once per analysis and then read
//! by the charting output and the signal rules.

use serde::Serialize;
use std::collections::BTreeMap;

/// Trait for indicators.
///
/// `compute` returns a `Vec<f64>` of the same length as its input. Positions
/// where the lookback window has not filled are `f64::NAN`, never zero.
///
/// # Look-ahead contamination guard
/// No output value at position t may depend on input at t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Series name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading positions that are always undefined.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Named indicator series, aligned to one date index.
///
/// Uses `BTreeMap` so serialized output has a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorValues {
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value of a named series at one position.
    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(index).copied())
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Last position of a named series (may be NaN during warmup).
    pub fn last(&self, name: &str) -> Option<f64> {
        self.series.get(name).and_then(|v| v.last().copied())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
