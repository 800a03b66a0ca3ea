//! Technical signal classification.
//!
//! Each rule reads the last value of one precomputed indicator series and
//! maps it to a Buy/Sell/Neutral recommendation against fixed thresholds or
//! against the last price. Rules never see anything but `IndicatorValues`
//! and the last price, so the same inputs always give the same table.

pub mod rules;

pub use rules::{
    BollingerBreakout, MacdHistogram, PriceVsEma, PriceVsSma, RsiBands, SignSignal, SignSource,
};

use crate::config::IndicatorConfig;
use crate::domain::{Action, Language, Signal};
use crate::indicators::IndicatorValues;

/// One row of the technical signal table.
///
/// # Invariants
/// - `evaluate()` is a pure function of its arguments
/// - an undefined indicator value yields `Action::Neutral` with an undefined value
pub trait SignalRule: Send + Sync {
    /// Display name, e.g. "Moving Average (7)".
    fn name(&self, language: Language) -> String;

    fn evaluate(&self, indicators: &IndicatorValues, last_price: f64, language: Language)
        -> Signal;
}

/// The dashboard's rule table in display order: SMA, RSI, MACD, Bollinger,
/// EMA, momentum, ROC.
pub fn technical_rules(config: &IndicatorConfig) -> Vec<Box<dyn SignalRule>> {
    let mut rules: Vec<Box<dyn SignalRule>> = Vec::new();
    for &w in &config.sma_windows {
        rules.push(Box::new(PriceVsSma::new(w)));
    }
    rules.push(Box::new(RsiBands::new(config.rsi_window)));
    rules.push(Box::new(MacdHistogram::new(
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
    )));
    rules.push(Box::new(BollingerBreakout::new(
        config.bollinger_window,
        config.bollinger_k,
    )));
    for &w in &config.ema_windows {
        rules.push(Box::new(PriceVsEma::new(w)));
    }
    rules.push(Box::new(SignSignal::new(
        SignSource::Momentum,
        config.momentum_window,
    )));
    rules.push(Box::new(SignSignal::new(SignSource::Roc, config.roc_window)));
    rules
}

/// Evaluate every rule, in order. Exactly one signal per rule.
pub fn classify_technical(
    rules: &[Box<dyn SignalRule>],
    indicators: &IndicatorValues,
    last_price: f64,
    language: Language,
) -> Vec<Signal> {
    rules
        .iter()
        .map(|rule| rule.evaluate(indicators, last_price, language))
        .collect()
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Buy below `low`, Sell above `high`, Neutral otherwise (bounds excluded).
pub fn classify_bands(value: f64, low: f64, high: f64) -> Action {
    if value < low {
        Action::Buy
    } else if value > high {
        Action::Sell
    } else {
        Action::Neutral
    }
}
