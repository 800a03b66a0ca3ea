//! Relative Strength Index (RSI).
//!
//! Up and down moves are smoothed with an exponentially weighted mean,
//! alpha = 1 / period, seeded by the first move. The move into the first
//! value has no predecessor and counts as zero.
//! RSI = 100 - 100 / (1 + avg_up / avg_down); 100 when avg_down == 0.
//! Lookback: period - 1.

use super::ema::ewm_of_series;
use super::indicator::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: series_name(period),
        }
    }
}

pub fn series_name(period: usize) -> String {
    format!("rsi_{period}")
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        if n == 0 {
            return Vec::new();
        }

        let mut ups = vec![0.0; n];
        let mut downs = vec![0.0; n];
        if values[0].is_nan() {
            ups[0] = f64::NAN;
            downs[0] = f64::NAN;
        }
        for i in 1..n {
            let change = values[i] - values[i - 1];
            if change.is_nan() {
                ups[i] = f64::NAN;
                downs[i] = f64::NAN;
            } else if change > 0.0 {
                ups[i] = change;
            } else {
                downs[i] = -change;
            }
        }

        let alpha = 1.0 / self.period as f64;
        let avg_up = ewm_of_series(&ups, alpha, self.period);
        let avg_down = ewm_of_series(&downs, alpha, self.period);

        avg_up
            .iter()
            .zip(&avg_down)
            .map(|(&up, &down)| compute_rsi(up, down))
            .collect()
    }
}

fn compute_rsi(avg_up: f64, avg_down: f64) -> f64 {
    if avg_up.is_nan() || avg_down.is_nan() {
        f64::NAN
    } else if avg_down == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_up / avg_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_2_worked_example() {
        // ups [0,1,1,0], downs [0,0,0,1], alpha 0.5
        // avg_up [0, .5, .75, .375], avg_down [0, 0, 0, .5]
        let result = Rsi::new(2).compute(&[1.0, 2.0, 3.0, 2.0]);
        assert!(result[0].is_nan());
        assert_approx(result[1], 100.0, 1e-9);
        assert_approx(result[2], 100.0, 1e-9);
        assert_approx(result[3], 42.857142857, 1e-6);
    }

    #[test]
    fn rsi_all_gains() {
        let result = Rsi::new(3).compute(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        for &v in &result[2..] {
            assert_approx(v, 100.0, 1e-9);
        }
    }

    #[test]
    fn rsi_all_losses_tends_to_zero() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let result = Rsi::new(3).compute(&closes);
        // Only the zero first move keeps avg_up above zero, and it decays.
        assert!(result[29] < 1e-6);
        assert!(result[29] >= 0.0);
    }

    #[test]
    fn rsi_flat_is_100() {
        let result = Rsi::new(3).compute(&[50.0; 5]);
        assert_approx(result[4], 100.0, 1e-9);
    }

    #[test]
    fn rsi_bounded() {
        let closes = [
            44.0, 44.34, 44.09, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ];
        let result = Rsi::new(14).compute(&closes);
        assert!(result[12].is_nan());
        for &v in &result[13..] {
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
        }
    }

    #[test]
    fn rsi_nan_propagates() {
        let result = Rsi::new(2).compute(&[1.0, 2.0, f64::NAN, 3.0, 4.0]);
        assert!(!result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(result[4].is_nan());
    }

    #[test]
    fn rsi_empty_input() {
        assert!(Rsi::new(14).compute(&[]).is_empty());
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 13);
    }
}
