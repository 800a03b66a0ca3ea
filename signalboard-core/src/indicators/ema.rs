//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: the first defined value (no SMA warmup), so EMA(1) is the input itself.
//! The first `period - 1` defined positions are reported as NaN.
//! Lookback: period - 1.

use super::indicator::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: series_name(period),
        }
    }
}

pub fn series_name(period: usize) -> String {
    format!("ema_{period}")
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        ema_of_series(values, self.period)
    }
}

/// EMA of an arbitrary series with span `period`.
///
/// Leading NaNs are skipped, so the EMA of a series that is itself still
/// warming up (the MACD line) starts where that series becomes defined.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    ewm_of_series(values, alpha, period)
}

/// Exponentially weighted mean without bias adjustment.
///
/// The recursion starts at the first defined value. Output is NaN until
/// `min_periods` defined values have been seen. A NaN after the seed taints
/// every later position.
pub fn ewm_of_series(values: &[f64], alpha: f64, min_periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };

    let mut prev = values[start];
    let mut seen = 1;
    if seen >= min_periods {
        result[start] = prev;
    }

    for i in (start + 1)..n {
        let v = values[i];
        if v.is_nan() {
            // NaN propagates: once we see NaN, subsequent values are tainted
            return result;
        }
        prev = alpha * v + (1.0 - alpha) * prev;
        seen += 1;
        if seen >= min_periods {
            result[i] = prev;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_3_seeded_by_first_value() {
        // alpha = 0.5: 10, 10.5, 11.25, 12.125, 13.0625
        let result = Ema::new(3).compute(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
        assert_approx(result[3], 12.125, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0625, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_1_is_identity() {
        let closes = [3.0, 7.5, 1.25, 9.0];
        let result = Ema::new(1).compute(&closes);
        assert_eq!(result, closes.to_vec());
    }

    #[test]
    fn ema_constant_series() {
        let result = Ema::new(5).compute(&[42.0; 10]);
        for &v in &result[4..] {
            assert_approx(v, 42.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_skips_leading_nan() {
        let values = [f64::NAN, f64::NAN, 10.0, 11.0, 12.0];
        let result = ema_of_series(&values, 2);
        assert!(result[2].is_nan());
        // alpha = 2/3: 10 → 10.6667 → 11.5556
        assert_approx(result[3], 10.0 + 2.0 / 3.0, 1e-9);
        assert_approx(result[4], (2.0 / 3.0) * 12.0 + (1.0 / 3.0) * result[3], 1e-9);
    }

    #[test]
    fn ema_nan_after_seed_taints_rest() {
        let result = Ema::new(2).compute(&[10.0, 11.0, f64::NAN, 13.0]);
        assert!(!result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn ema_too_few_values() {
        let result = Ema::new(5).compute(&[1.0, 2.0, 3.0]);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_lookback() {
        assert_eq!(Ema::new(14).lookback(), 13);
        assert_eq!(Ema::new(100).name(), "ema_100");
    }
}
