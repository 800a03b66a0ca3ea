//! Concrete signal rules.
//!
//! RSI, MACD, EMA, momentum and ROC values are rounded to two decimals
//! before comparison. SMA and Bollinger comparisons use raw values.

use super::{classify_bands, round2, SignalRule};
use crate::domain::{Action, Language, Signal, SignalValue};
use crate::indicators::{bollinger, ema, macd, momentum, roc, rsi, sma};
use crate::indicators::{BollingerBand, IndicatorValues, MacdComponent};

fn last_value(indicators: &IndicatorValues, key: &str) -> f64 {
    indicators.last(key).unwrap_or(f64::NAN)
}

fn undefined(name: String) -> Signal {
    Signal::new(name, SignalValue::Undefined, Action::Neutral)
}

// ── Price vs. SMA ──

/// Buy when the SMA sits below the last price, Sell when above.
#[derive(Debug, Clone)]
pub struct PriceVsSma {
    pub period: usize,
    indicator_key: String,
}

impl PriceVsSma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            indicator_key: sma::series_name(period),
        }
    }
}

impl SignalRule for PriceVsSma {
    fn name(&self, language: Language) -> String {
        match language {
            Language::En => format!("Moving Average ({})", self.period),
            Language::Fr => format!("Moyenne Mobile ({})", self.period),
        }
    }

    fn evaluate(&self, indicators: &IndicatorValues, last_price: f64, language: Language) -> Signal {
        let value = last_value(indicators, &self.indicator_key);
        if value.is_nan() || last_price.is_nan() {
            return undefined(self.name(language));
        }
        // Shown rounded, compared raw.
        Signal::new(
            self.name(language),
            SignalValue::number(round2(value)),
            Action::above_is_buy(last_price, value),
        )
    }
}

// ── RSI ──

/// Buy under 30 (oversold), Sell over 70 (overbought).
#[derive(Debug, Clone)]
pub struct RsiBands {
    pub period: usize,
    indicator_key: String,
}

impl RsiBands {
    pub const OVERSOLD: f64 = 30.0;
    pub const OVERBOUGHT: f64 = 70.0;

    pub fn new(period: usize) -> Self {
        Self {
            period,
            indicator_key: rsi::series_name(period),
        }
    }
}

impl SignalRule for RsiBands {
    fn name(&self, language: Language) -> String {
        match language {
            Language::En => format!("Relative Strength Index ({})", self.period),
            Language::Fr => format!("Indice de force relative ({})", self.period),
        }
    }

    fn evaluate(&self, indicators: &IndicatorValues, _last_price: f64, language: Language) -> Signal {
        let value = round2(last_value(indicators, &self.indicator_key));
        if value.is_nan() {
            return undefined(self.name(language));
        }
        Signal::new(
            self.name(language),
            SignalValue::number(value),
            classify_bands(value, Self::OVERSOLD, Self::OVERBOUGHT),
        )
    }
}

// ── MACD ──

/// Sign of the MACD histogram.
#[derive(Debug, Clone)]
pub struct MacdHistogram {
    pub fast: usize,
    pub slow: usize,
    indicator_key: String,
}

impl MacdHistogram {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast,
            slow,
            indicator_key: macd::series_name(MacdComponent::Histogram, fast, slow, signal),
        }
    }
}

impl SignalRule for MacdHistogram {
    fn name(&self, _language: Language) -> String {
        format!("MACD ({},{})", self.fast, self.slow)
    }

    fn evaluate(&self, indicators: &IndicatorValues, _last_price: f64, language: Language) -> Signal {
        let value = round2(last_value(indicators, &self.indicator_key));
        if value.is_nan() {
            return undefined(self.name(language));
        }
        Signal::new(
            self.name(language),
            SignalValue::number(value),
            Action::above_is_buy(value, 0.0),
        )
    }
}

// ── Bollinger ──

/// Buy when the last price breaks below the lower band, Sell above the upper.
#[derive(Debug, Clone)]
pub struct BollingerBreakout {
    pub period: usize,
    pub multiplier: f64,
    upper_key: String,
    lower_key: String,
}

impl BollingerBreakout {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            period,
            multiplier,
            upper_key: bollinger::series_name(BollingerBand::Upper, period, multiplier),
            lower_key: bollinger::series_name(BollingerBand::Lower, period, multiplier),
        }
    }
}

impl SignalRule for BollingerBreakout {
    fn name(&self, language: Language) -> String {
        match language {
            Language::En => format!("Bollinger Bands ({}, {})", self.period, self.multiplier),
            Language::Fr => format!("Bandes de Bollinger ({}, {})", self.period, self.multiplier),
        }
    }

    fn evaluate(&self, indicators: &IndicatorValues, last_price: f64, language: Language) -> Signal {
        let upper = last_value(indicators, &self.upper_key);
        let lower = last_value(indicators, &self.lower_key);
        if upper.is_nan() || lower.is_nan() || last_price.is_nan() {
            return undefined(self.name(language));
        }
        Signal::new(
            self.name(language),
            SignalValue::Bands { upper, lower },
            classify_bands(last_price, lower, upper),
        )
    }
}

// ── Price vs. EMA ──

/// Buy when the last price is above the EMA, Sell when below.
#[derive(Debug, Clone)]
pub struct PriceVsEma {
    pub period: usize,
    indicator_key: String,
}

impl PriceVsEma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            indicator_key: ema::series_name(period),
        }
    }
}

impl SignalRule for PriceVsEma {
    fn name(&self, _language: Language) -> String {
        format!("EMA ({})", self.period)
    }

    fn evaluate(&self, indicators: &IndicatorValues, last_price: f64, language: Language) -> Signal {
        let value = round2(last_value(indicators, &self.indicator_key));
        if value.is_nan() || last_price.is_nan() {
            return undefined(self.name(language));
        }
        Signal::new(
            self.name(language),
            SignalValue::number(value),
            Action::above_is_buy(last_price, value),
        )
    }
}

// ── Sign rules (momentum, ROC) ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignSource {
    Momentum,
    Roc,
}

/// Buy on a positive value, Sell on a negative one.
#[derive(Debug, Clone)]
pub struct SignSignal {
    pub source: SignSource,
    pub period: usize,
    indicator_key: String,
}

impl SignSignal {
    pub fn new(source: SignSource, period: usize) -> Self {
        let indicator_key = match source {
            SignSource::Momentum => momentum::series_name(period),
            SignSource::Roc => roc::series_name(period),
        };
        Self {
            source,
            period,
            indicator_key,
        }
    }
}

impl SignalRule for SignSignal {
    fn name(&self, _language: Language) -> String {
        match self.source {
            SignSource::Momentum => format!("Momentum ({})", self.period),
            SignSource::Roc => format!("ROC ({})", self.period),
        }
    }

    fn evaluate(&self, indicators: &IndicatorValues, _last_price: f64, language: Language) -> Signal {
        let value = round2(last_value(indicators, &self.indicator_key));
        if value.is_nan() {
            return undefined(self.name(language));
        }
        Signal::new(
            self.name(language),
            SignalValue::number(value),
            Action::above_is_buy(value, 0.0),
        )
    }
}
