//! Run orchestration: per-symbol pipeline and partial-failure aggregation.
//!
//! Each security runs the full indicator → signal → recommendation → ledger
//! chain independently. A failed symbol becomes a line in the run's `errors`
//! list; only a run where every symbol fails is an error itself.

use chrono::{DateTime, Utc};

use crate::domain::bar;
use crate::domain::config::{PulseConfig, SymbolSpec};
use crate::domain::error::PulseError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::ledger::{self, LedgerState, PortfolioEntry};
use crate::domain::recommendation::recommend;
use crate::domain::signal::SignalSet;
use crate::domain::snapshot::{PortfolioView, RunSnapshot, TickerReport};
use crate::ports::data_port::BarSource;
use crate::ports::news_port::NewsSource;

/// Process every configured symbol sequentially and assemble the snapshot.
///
/// `now` stamps the snapshot and every transaction recorded this run; the
/// core itself never reads the wall clock.
pub fn run_pipeline(
    source: &dyn BarSource,
    news: &dyn NewsSource,
    ledger: &mut LedgerState,
    cfg: &PulseConfig,
    now: DateTime<Utc>,
) -> Result<RunSnapshot, PulseError> {
    let mut tickers = Vec::with_capacity(cfg.universe.len());
    let mut errors = Vec::new();

    for spec in &cfg.universe {
        match process_symbol(source, news, ledger, cfg, spec, now) {
            Ok(report) => tickers.push(report),
            Err(e) => errors.push(format!("{}: {}", spec.symbol, e)),
        }
    }

    if tickers.is_empty() {
        return Err(PulseError::AllSymbolsFailed {
            attempted: cfg.universe.len(),
        });
    }

    let portfolio_summary = ledger::summarize(ledger, cfg.initial_capital, now);

    Ok(RunSnapshot {
        generated_at: now,
        tickers,
        portfolio_summary,
        errors,
    })
}

/// One security through the whole chain, mutating its ledger entry at most
/// once.
pub fn process_symbol(
    source: &dyn BarSource,
    news: &dyn NewsSource,
    ledger: &mut LedgerState,
    cfg: &PulseConfig,
    spec: &SymbolSpec,
    now: DateTime<Utc>,
) -> Result<TickerReport, PulseError> {
    let bars = source.fetch_bars(&spec.symbol)?;
    let last_close = match bars.last() {
        Some(b) => b.close,
        None => {
            return Err(PulseError::DataUnavailable {
                symbol: spec.symbol.clone(),
            });
        }
    };
    debug_assert!(bar::is_ordered(&bars), "bar source returned unordered bars");

    let indicators = IndicatorSet::compute(&bars, &cfg.indicators);
    let signals = SignalSet::classify(&indicators, &cfg.signals);
    let recommendation = recommend(&signals, &indicators, &cfg.scoring);

    let entry = ledger
        .entry(spec.symbol.clone())
        .or_insert_with(|| PortfolioEntry::new(cfg.initial_capital));
    ledger::apply_action(entry, last_close, recommendation.action, now);

    Ok(TickerReport {
        symbol: spec.symbol.clone(),
        name: spec.name.clone(),
        market: spec.market.clone(),
        currency: spec.currency.clone(),
        portfolio: PortfolioView::from_entry(entry),
        history: bars,
        indicators,
        signals,
        recommendation,
        news: news.recent(&spec.symbol, cfg.news_limit),
    })
}
