//! MACD (Moving Average Convergence Divergence).
//!
//! MACD line = EMA(close, fast) - EMA(close, slow)
//! Signal line = EMA(MACD line, signal)
//! Histogram = MACD line - Signal line
//!
//! EMAs use the first-value-seeded recursion (see [`super::ema`]); the only
//! history requirement is having `slow` closes.

use crate::domain::indicator::ema::ewma_span;

/// MACD line, signal line and histogram of the final bar, or `None` with
/// fewer than `slow` closes or a non-finite result.
pub fn latest_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<(f64, f64, f64)> {
    if fast == 0 || slow == 0 || signal_period == 0 || closes.len() < slow {
        return None;
    }

    let ema_fast = ewma_span(closes, fast);
    let ema_slow = ewma_span(closes, slow);
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ewma_span(&line, signal_period);

    let macd = *line.last()?;
    let signal = *signal_line.last()?;
    let histogram = macd - signal;

    (macd.is_finite() && signal.is_finite() && histogram.is_finite())
        .then_some((macd, signal, histogram))
}
