//! Simple moving average over the trailing n closes.

/// Mean of the last `period` closes, or `None` with fewer than `period`.
pub fn latest_sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let tail = &closes[closes.len() - period..];
    Some(tail.iter().sum::<f64>() / period as f64)
}
