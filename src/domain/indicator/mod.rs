//! Technical indicator engine.
//!
//! Each indicator family is computed independently from the ordered bar
//! series and degrades to `None` on insufficient history or a numerically
//! undefined result. The JSON field names (`sma5`, `sma20`, `rsi14`) are the
//! wire contract of the snapshot; the underlying periods come from
//! [`IndicatorConfig`] and are carried inside the composite values.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod stochastic;
pub mod macd;

use serde::{Deserialize, Serialize};

use crate::domain::bar::{self, Bar};
use crate::domain::config::IndicatorConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
    pub k_period: usize,
    pub d_period: usize,
    pub smooth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub fast: usize,
    pub slow: usize,
    pub signal_period: usize,
}

/// Fixed-shape indicator output for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma5: Option<f64>,
    pub sma20: Option<f64>,
    pub rsi14: Option<f64>,
    pub stochastic: Option<StochasticValue>,
    pub macd: Option<MacdValue>,
}

impl IndicatorSet {
    /// Compute all indicator families for the latest bar of `bars`.
    ///
    /// Deterministic: no wall clock, no randomness.
    pub fn compute(bars: &[Bar], cfg: &IndicatorConfig) -> Self {
        let closes = bar::closes(bars);

        let stochastic = stochastic::latest_stochastic(
            bars,
            cfg.stoch_k_period,
            cfg.stoch_d_period,
            cfg.stoch_smooth,
        )
        .map(|(k, d)| StochasticValue {
            k,
            d,
            k_period: cfg.stoch_k_period,
            d_period: cfg.stoch_d_period,
            smooth: cfg.stoch_smooth,
        });

        let macd = macd::latest_macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal).map(
            |(macd, signal, histogram)| MacdValue {
                macd,
                signal,
                histogram,
                fast: cfg.macd_fast,
                slow: cfg.macd_slow,
                signal_period: cfg.macd_signal,
            },
        );

        IndicatorSet {
            sma5: sma::latest_sma(&closes, cfg.sma_short),
            sma20: sma::latest_sma(&closes, cfg.sma_long),
            rsi14: rsi::latest_rsi(&closes, cfg.rsi_period),
            stochastic,
            macd,
        }
    }

    /// All-absent set, used when a symbol has no usable history at all.
    pub fn empty() -> Self {
        IndicatorSet {
            sma5: None,
            sma20: None,
            rsi14: None,
            stochastic: None,
            macd: None,
        }
    }
}
