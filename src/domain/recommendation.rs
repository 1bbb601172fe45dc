//! Recommendation scoring: signal labels → bounded score, action, rationale.
//!
//! Starts from a neutral baseline and applies one additive delta per
//! non-neutral signal family, then clamps to [0, 100]. Every applied delta
//! appends a rationale note in a fixed order (trend, rsi, stochastic, macd)
//! quoting the indicator's numeric value when it is available. The output
//! carries the action thresholds used so consumers can audit the decision.

use serde::{Deserialize, Serialize};

use crate::domain::config::ScoreConfig;
use crate::domain::indicator::IndicatorSet;
use crate::domain::signal::{ActionSignal, SignalSet, TrendSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub buy: u8,
    pub sell: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub score: u8,
    pub action: TradeAction,
    pub notes: Vec<String>,
    pub thresholds: Thresholds,
}

pub fn recommend(
    signals: &SignalSet,
    indicators: &IndicatorSet,
    cfg: &ScoreConfig,
) -> Recommendation {
    let mut score = cfg.baseline;
    let mut notes = Vec::new();

    match signals.trend {
        TrendSignal::Bullish => {
            score += cfg.trend_delta;
            notes.push(format!(
                "trend bullish: SMA5 {} above SMA20 {} (+{})",
                fmt(indicators.sma5),
                fmt(indicators.sma20),
                cfg.trend_delta
            ));
        }
        TrendSignal::Bearish => {
            score -= cfg.trend_delta;
            notes.push(format!(
                "trend bearish: SMA5 {} below SMA20 {} (-{})",
                fmt(indicators.sma5),
                fmt(indicators.sma20),
                cfg.trend_delta
            ));
        }
        TrendSignal::Neutral => {}
    }

    match signals.rsi {
        ActionSignal::Buy => {
            score += cfg.rsi_delta;
            notes.push(format!(
                "RSI {} oversold (+{})",
                fmt(indicators.rsi14),
                cfg.rsi_delta
            ));
        }
        ActionSignal::Sell => {
            score -= cfg.rsi_delta;
            notes.push(format!(
                "RSI {} overbought (-{})",
                fmt(indicators.rsi14),
                cfg.rsi_delta
            ));
        }
        ActionSignal::Hold => {}
    }

    match signals.stochastic {
        ActionSignal::Buy => {
            score += cfg.stoch_delta;
            notes.push(format!(
                "stochastic %K {} / %D {} buying pressure (+{})",
                fmt(indicators.stochastic.as_ref().map(|s| s.k)),
                fmt(indicators.stochastic.as_ref().map(|s| s.d)),
                cfg.stoch_delta
            ));
        }
        ActionSignal::Sell => {
            score -= cfg.stoch_delta;
            notes.push(format!(
                "stochastic %K {} / %D {} selling pressure (-{})",
                fmt(indicators.stochastic.as_ref().map(|s| s.k)),
                fmt(indicators.stochastic.as_ref().map(|s| s.d)),
                cfg.stoch_delta
            ));
        }
        ActionSignal::Hold => {}
    }

    match signals.macd {
        TrendSignal::Bullish => {
            score += cfg.macd_delta;
            notes.push(format!(
                "MACD {} above signal {} (+{})",
                fmt(indicators.macd.as_ref().map(|m| m.macd)),
                fmt(indicators.macd.as_ref().map(|m| m.signal)),
                cfg.macd_delta
            ));
        }
        TrendSignal::Bearish => {
            score -= cfg.macd_delta;
            notes.push(format!(
                "MACD {} below signal {} (-{})",
                fmt(indicators.macd.as_ref().map(|m| m.macd)),
                fmt(indicators.macd.as_ref().map(|m| m.signal)),
                cfg.macd_delta
            ));
        }
        TrendSignal::Neutral => {}
    }

    let score = score.clamp(0, 100) as u8;
    let action = if score >= cfg.buy_threshold {
        TradeAction::Buy
    } else if score <= cfg.sell_threshold {
        TradeAction::Sell
    } else {
        TradeAction::Hold
    };

    Recommendation {
        score,
        action,
        notes,
        thresholds: Thresholds {
            buy: cfg.buy_threshold,
            sell: cfg.sell_threshold,
        },
    }
}

fn fmt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}
