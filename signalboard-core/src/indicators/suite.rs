//! The indicator set of one analysis, built from configuration.

use super::bollinger::{Bollinger, BollingerBand};
use super::ema::Ema;
use super::indicator::{Indicator, IndicatorValues};
use super::macd::{Macd, MacdComponent};
use super::momentum::Momentum;
use super::roc::Roc;
use super::rsi::Rsi;
use super::sma::Sma;
use crate::config::IndicatorConfig;
use tracing::debug;

/// Every indicator the dashboard charts and classifies.
pub struct IndicatorSuite {
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorSuite {
    pub fn from_config(config: &IndicatorConfig) -> Self {
        let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();

        for &w in &config.sma_windows {
            indicators.push(Box::new(Sma::new(w)));
        }
        indicators.push(Box::new(Rsi::new(config.rsi_window)));
        for component in [
            MacdComponent::Line,
            MacdComponent::Signal,
            MacdComponent::Histogram,
        ] {
            indicators.push(Box::new(Macd::new(
                component,
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
            )));
        }
        for band in [
            BollingerBand::Upper,
            BollingerBand::Middle,
            BollingerBand::Lower,
        ] {
            indicators.push(Box::new(Bollinger::new(
                band,
                config.bollinger_window,
                config.bollinger_k,
            )));
        }
        for &w in &config.ema_windows {
            indicators.push(Box::new(Ema::new(w)));
        }
        indicators.push(Box::new(Momentum::new(config.momentum_window)));
        indicators.push(Box::new(Roc::new(config.roc_window)));

        Self { indicators }
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Longest warmup across the suite.
    pub fn max_lookback(&self) -> usize {
        self.indicators
            .iter()
            .map(|ind| ind.lookback())
            .max()
            .unwrap_or(0)
    }

    pub fn compute(&self, closes: &[f64]) -> IndicatorValues {
        let mut values = IndicatorValues::new();
        for ind in &self.indicators {
            let series = ind.compute(closes);
            debug_assert_eq!(
                series.len(),
                closes.len(),
                "indicator {} returned wrong length",
                ind.name()
            );
            values.insert(ind.name(), series);
        }
        debug!(
            indicators = values.len(),
            points = closes.len(),
            "indicators computed"
        );
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{ema, macd, rsi, sma};

    #[test]
    fn default_suite_names() {
        let suite = IndicatorSuite::from_config(&IndicatorConfig::default());
        // 3 SMA + RSI + 3 MACD + 3 Bollinger + 2 EMA + momentum + ROC
        assert_eq!(suite.len(), 14);
        assert_eq!(suite.max_lookback(), 99);

        let values = suite.compute(&[100.0; 5]);
        assert!(values.get_series(&sma::series_name(100)).is_some());
        assert!(values.get_series(&ema::series_name(14)).is_some());
        assert!(values.get_series(&rsi::series_name(14)).is_some());
        assert!(values
            .get_series(&macd::series_name(MacdComponent::Histogram, 12, 26, 9))
            .is_some());
        assert!(values.get_series("bollinger_upper_20_2").is_some());
        assert!(values.get_series("momentum_10").is_some());
        assert!(values.get_series("roc_12").is_some());
    }

    #[test]
    fn every_series_has_input_length() {
        let closes: Vec<f64> = (0..150).map(|i| 50.0 + i as f64).collect();
        let values = IndicatorSuite::from_config(&IndicatorConfig::default()).compute(&closes);
        for name in values.names() {
            assert_eq!(values.get_series(name).unwrap().len(), 150, "{name}");
        }
    }
}
