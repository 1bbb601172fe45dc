//! OHLCV bar representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a fixed time interval.
///
/// Series handed to the indicator engine are expected to be ascending by
/// timestamp with unique timestamps; [`is_ordered`] checks that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// All price/volume fields finite and non-negative.
    pub fn is_sane(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Strictly ascending, duplicate-free timestamps.
pub fn is_ordered(bars: &[Bar]) -> bool {
    bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
}

/// Extract the close series.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}
