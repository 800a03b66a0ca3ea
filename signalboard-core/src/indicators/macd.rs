//! Moving Average Convergence-Divergence (MACD).
//!
//! line      = EMA(fast) - EMA(slow)
//! signal    = EMA(signal) of the line, started where the line is defined
//! histogram = line - signal
//!
//! Exposed as one Indicator per component, like the Bollinger bands.
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal/histogram.

use super::ema::ema_of_series;
use super::indicator::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdComponent {
    Line,
    Signal,
    Histogram,
}

impl MacdComponent {
    fn label(self) -> &'static str {
        match self {
            MacdComponent::Line => "line",
            MacdComponent::Signal => "signal",
            MacdComponent::Histogram => "histogram",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    component: MacdComponent,
    name: String,
}

impl Macd {
    pub fn new(component: MacdComponent, fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        Self {
            fast,
            slow,
            signal,
            component,
            name: series_name(component, fast, slow, signal),
        }
    }
}

pub fn series_name(component: MacdComponent, fast: usize, slow: usize, signal: usize) -> String {
    format!("macd_{}_{fast}_{slow}_{signal}", component.label())
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let line = self.fast.max(self.slow).saturating_sub(1);
        match self.component {
            MacdComponent::Line => line,
            MacdComponent::Signal | MacdComponent::Histogram => line + self.signal - 1,
        }
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let series = macd_series(values, self.fast, self.slow, self.signal);
        match self.component {
            MacdComponent::Line => series.line,
            MacdComponent::Signal => series.signal,
            MacdComponent::Histogram => series.histogram,
        }
    }
}

/// All three MACD components over one input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd_series(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = ema_of_series(values, fast);
    let slow_ema = ema_of_series(values, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema_of_series(&line, signal);
    let histogram = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();
    MacdSeries {
        line,
        signal: signal_line,
        histogram,
    }
}
