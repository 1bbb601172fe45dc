//! Stochastic oscillator (%K/%D).
//!
//! raw %K = (close - lowest low) / (highest high - lowest low) * 100 over the
//! trailing k_period window. A zero-range window (highest == lowest) leaves
//! that point undefined rather than dividing by zero, and an undefined point
//! poisons every smoothing window containing it. %K is the trailing mean of
//! `smooth` raw points; %D is the trailing mean of `d_period` smoothed points.

use crate::domain::bar::Bar;

/// Smoothed %K and %D of the final bar, or `None` when there are fewer than
/// k_period bars or any required rolling window holds an undefined point.
pub fn latest_stochastic(
    bars: &[Bar],
    k_period: usize,
    d_period: usize,
    smooth: usize,
) -> Option<(f64, f64)> {
    if k_period == 0 || d_period == 0 || smooth == 0 || bars.len() < k_period {
        return None;
    }

    let n = bars.len();
    let mut raw: Vec<Option<f64>> = vec![None; n];
    for i in (k_period - 1)..n {
        let window = &bars[i + 1 - k_period..=i];
        let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let range = highest - lowest;
        if range > 0.0 {
            raw[i] = Some((bars[i].close - lowest) / range * 100.0);
        }
    }

    let smoothed = trailing_mean(&raw, smooth);
    let d_line = trailing_mean(&smoothed, d_period);

    match (smoothed[n - 1], d_line[n - 1]) {
        (Some(k), Some(d)) => Some((k, d)),
        _ => None,
    }
}

/// Trailing mean over `window` points; `None` unless the window is full and
/// every point in it is defined.
fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(Option::is_some) {
            let sum: f64 = slice.iter().map(|v| v.unwrap()).sum();
            out[i] = Some(sum / window as f64);
        }
    }
    out
}
