//! Concrete indicator implementations.
//!
//! All indicators implement the `Indicator` trait and operate on a plain
//! close-price slice. They are computed once per analysis by the
//! `IndicatorSuite` into `IndicatorValues`, which the signal rules read.
//!
//! Multi-series indicators (Bollinger, MACD) are exposed as separate named
//! instances per component, keeping the single-series `Indicator` trait
//! unchanged.

pub mod bollinger;
pub mod ema;
pub mod indicator;
pub mod macd;
pub mod momentum;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod suite;

pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use indicator::{Indicator, IndicatorValues};
pub use macd::{macd_series, Macd, MacdComponent, MacdSeries};
pub use momentum::Momentum;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;
pub use suite::IndicatorSuite;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
