//! Rate of Change (ROC).
//!
//! Percentage price change over N values.
//! ROC[t] = (close[t] - close[t-period]) / close[t-period] * 100
//! Lookback: period.

use super::indicator::Indicator;

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
    name: String,
}

impl Roc {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self {
            period,
            name: series_name(period),
        }
    }
}

pub fn series_name(period: usize) -> String {
    format!("roc_{period}")
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        for i in self.period..n {
            let prev = values[i - self.period];
            let curr = values[i];
            if prev.is_nan() || curr.is_nan() || prev == 0.0 {
                result[i] = f64::NAN;
            } else {
                result[i] = (curr - prev) / prev * 100.0;
            }
        }

        result
    }
}
