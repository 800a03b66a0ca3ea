//! Look-ahead contamination tests for every indicator.
//!
//! Invariant: no indicator value at position t may depend on prices from
//! position t+1 or later.
//!
//! Method: compute on a truncated series (0..100) and on the full series
//! (0..200). Positions 0..100 must be identical between both runs. Any
//! difference means the indicator is leaking future data into past values.

use signalboard_core::config::IndicatorConfig;
use signalboard_core::indicators::*;

/// Deterministic pseudo-random walk of close prices.
fn make_test_closes(n: usize) -> Vec<f64> {
    let mut closes = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Simple LCG step
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = f64::max(price, 10.0); // floor at 10
        closes.push(price);
    }

    closes
}

/// Assert that the indicator produces identical values for 0..truncated_len
/// whether computed on a truncated or full series.
fn assert_no_lookahead(indicator: &dyn Indicator, full: &[f64], truncated_len: usize) {
    let truncated = &full[..truncated_len];
    let full_result = indicator.compute(full);
    let truncated_result = indicator.compute(truncated);

    assert_eq!(
        truncated_result.len(),
        truncated_len,
        "{}: truncated result length mismatch",
        indicator.name()
    );
    assert_eq!(
        full_result.len(),
        full.len(),
        "{}: full result length mismatch",
        indicator.name()
    );

    for i in 0..truncated_len {
        let t = truncated_result[i];
        let f = full_result[i];

        if t.is_nan() && f.is_nan() {
            continue;
        }

        assert!(
            !t.is_nan() && !f.is_nan(),
            "{}: NaN mismatch at {i} (truncated={t}, full={f})",
            indicator.name()
        );

        assert!(
            (t - f).abs() < 1e-10,
            "{}: look-ahead contamination at {i}: truncated={t}, full={f}, diff={}",
            indicator.name(),
            (t - f).abs()
        );
    }
}

#[test]
fn lookahead_sma() {
    let closes = make_test_closes(200);
    assert_no_lookahead(&Sma::new(7), &closes, 100);
    assert_no_lookahead(&Sma::new(21), &closes, 100);
}

#[test]
fn lookahead_ema() {
    let closes = make_test_closes(200);
    assert_no_lookahead(&Ema::new(14), &closes, 100);
    assert_no_lookahead(&Ema::new(100), &closes, 100);
}

#[test]
fn lookahead_rsi() {
    let closes = make_test_closes(200);
    assert_no_lookahead(&Rsi::new(14), &closes, 100);
    assert_no_lookahead(&Rsi::new(7), &closes, 100);
}

#[test]
fn lookahead_macd() {
    let closes = make_test_closes(200);
    for component in [
        MacdComponent::Line,
        MacdComponent::Signal,
        MacdComponent::Histogram,
    ] {
        assert_no_lookahead(&Macd::new(component, 12, 26, 9), &closes, 100);
    }
}

#[test]
fn lookahead_bollinger() {
    let closes = make_test_closes(200);
    assert_no_lookahead(&Bollinger::upper(20, 2.0), &closes, 100);
    assert_no_lookahead(&Bollinger::middle(20, 2.0), &closes, 100);
    assert_no_lookahead(&Bollinger::lower(20, 2.0), &closes, 100);
}

#[test]
fn lookahead_roc() {
    let closes = make_test_closes(200);
    assert_no_lookahead(&Roc::new(12), &closes, 100);
}

#[test]
fn lookahead_momentum() {
    let closes = make_test_closes(200);
    assert_no_lookahead(&Momentum::new(10), &closes, 100);
}

#[test]
fn lookahead_full_suite() {
    let closes = make_test_closes(200);
    let suite = IndicatorSuite::from_config(&IndicatorConfig::default());
    let full = suite.compute(&closes);
    let truncated = suite.compute(&closes[..120]);

    for name in full.names() {
        let f = full.get_series(name).unwrap();
        let t = truncated.get_series(name).unwrap();
        for i in 0..120 {
            assert!(
                (f[i].is_nan() && t[i].is_nan()) || (f[i] - t[i]).abs() < 1e-10,
                "{name}: look-ahead contamination at {i}"
            );
        }
    }
}
