//! Signal classification: indicator values → categorical labels.
//!
//! Pure mapping with fixed cut-offs; every field is always populated, an
//! absent indicator falls back to the neutral/hold label.

use serde::{Deserialize, Serialize};

use crate::domain::config::SignalConfig;
use crate::domain::indicator::IndicatorSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSignal {
    Buy,
    Sell,
    Hold,
}

/// Labels per indicator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub trend: TrendSignal,
    pub rsi: ActionSignal,
    pub stochastic: ActionSignal,
    pub macd: TrendSignal,
}

impl SignalSet {
    pub fn classify(indicators: &IndicatorSet, cfg: &SignalConfig) -> Self {
        let trend = match (indicators.sma5, indicators.sma20) {
            (Some(short), Some(long)) if short > long => TrendSignal::Bullish,
            (Some(short), Some(long)) if short < long => TrendSignal::Bearish,
            _ => TrendSignal::Neutral,
        };

        let rsi = match indicators.rsi14 {
            Some(v) if v >= cfg.rsi_overbought => ActionSignal::Sell,
            Some(v) if v <= cfg.rsi_oversold => ActionSignal::Buy,
            Some(_) => ActionSignal::Hold,
            None => ActionSignal::Hold,
        };

        let stochastic = match &indicators.stochastic {
            Some(s) if s.k >= cfg.stoch_overbought => ActionSignal::Sell,
            Some(s) if s.k <= cfg.stoch_oversold => ActionSignal::Buy,
            Some(s) if s.k > s.d => ActionSignal::Buy,
            Some(s) if s.k < s.d => ActionSignal::Sell,
            Some(_) => ActionSignal::Hold,
            None => ActionSignal::Hold,
        };

        let macd = match &indicators.macd {
            Some(m) if m.macd > m.signal => TrendSignal::Bullish,
            Some(m) if m.macd < m.signal => TrendSignal::Bearish,
            Some(_) => TrendSignal::Neutral,
            None => TrendSignal::Neutral,
        };

        SignalSet {
            trend,
            rsi,
            stochastic,
            macd,
        }
    }
}
