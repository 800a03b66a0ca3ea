//! Momentum proxy.
//!
//! The dashboard's "Momentum (N)" line is a simple moving average of the
//! close over N values, not a price difference. Kept under its own name so
//! the rule table and the charts label it as momentum.
//! Lookback: period - 1.

use super::indicator::Indicator;
use super::sma::sma_of_series;

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    name: String,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        Self {
            period,
            name: series_name(period),
        }
    }
}

pub fn series_name(period: usize) -> String {
    format!("momentum_{period}")
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        sma_of_series(values, self.period)
    }
}
