//! Run configuration threaded into the engine calls.
//!
//! All tunables live here as one immutable value so the pipeline stays
//! deterministic and testable with varied settings.

/// Indicator window parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub sma_short: usize,
    pub sma_long: usize,
    pub rsi_period: usize,
    pub stoch_k_period: usize,
    pub stoch_d_period: usize,
    pub stoch_smooth: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            sma_short: 5,
            sma_long: 20,
            rsi_period: 14,
            stoch_k_period: 14,
            stoch_d_period: 3,
            stoch_smooth: 3,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Signal classification cut-offs.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub stoch_overbought: f64,
    pub stoch_oversold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            stoch_overbought: 80.0,
            stoch_oversold: 20.0,
        }
    }
}

/// Score deltas and action thresholds for the recommendation scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub baseline: i32,
    pub trend_delta: i32,
    pub rsi_delta: i32,
    pub stoch_delta: i32,
    pub macd_delta: i32,
    pub buy_threshold: u8,
    pub sell_threshold: u8,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            baseline: 50,
            trend_delta: 20,
            rsi_delta: 15,
            stoch_delta: 10,
            macd_delta: 15,
            buy_threshold: 80,
            sell_threshold: 20,
        }
    }
}

/// One security in the configured universe, with display metadata carried
/// through to the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSpec {
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub currency: String,
}

impl SymbolSpec {
    pub fn bare(symbol: &str) -> Self {
        SymbolSpec {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            market: String::new(),
            currency: String::new(),
        }
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseConfig {
    pub universe: Vec<SymbolSpec>,
    pub initial_capital: f64,
    pub indicators: IndicatorConfig,
    pub signals: SignalConfig,
    pub scoring: ScoreConfig,
    /// Articles kept per symbol in the snapshot.
    pub news_limit: usize,
}

impl Default for PulseConfig {
    fn default() -> Self {
        PulseConfig {
            universe: Vec::new(),
            initial_capital: 10_000_000.0,
            indicators: IndicatorConfig::default(),
            signals: SignalConfig::default(),
            scoring: ScoreConfig::default(),
            news_limit: 5,
        }
    }
}
