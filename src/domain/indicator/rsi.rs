//! RSI (Relative Strength Index).
//!
//! Per-bar deltas are split into gains and losses, each smoothed with an
//! EWMA of alpha = 1/period seeded from the first delta. RS = avg_gain /
//! avg_loss, RSI = 100 - 100/(1 + RS).
//!
//! When avg_loss is 0 with positive gains the ratio saturates and RSI is 100;
//! only a 0/0 ratio (flat series) is undefined and reported as `None`. This
//! asymmetry with the stochastic's zero-range handling is intentional.

use crate::domain::indicator::ema::ewma;

/// RSI of the final bar, or `None` with fewer than period+1 closes or an
/// undefined final value.
pub fn latest_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for w in closes.windows(2) {
        let change = w[1] - w[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let alpha = 1.0 / period as f64;
    let avg_gain = *ewma(&gains, alpha).last()?;
    let avg_loss = *ewma(&losses, alpha).last()?;

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.is_finite().then_some(rsi)
}
