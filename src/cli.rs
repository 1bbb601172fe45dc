//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_bar_source::CsvBarSource;
use crate::adapters::csv_history_store::CsvHistoryStore;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_news_adapter::FileNewsAdapter;
use crate::adapters::json_ledger_store::JsonLedgerStore;
use crate::adapters::snapshot_writer;
use crate::domain::config::{IndicatorConfig, PulseConfig, ScoreConfig, SignalConfig, SymbolSpec};
use crate::domain::error::PulseError;
use crate::domain::ledger;
use crate::domain::runner;
use crate::ports::config_port::ConfigPort;
use crate::ports::news_port::{NewsSource, NoNews};

#[derive(Parser, Debug)]
#[command(name = "marketpulse", about = "Market indicator snapshot and paper-trading pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process the universe and write a fresh snapshot
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the persisted portfolio state
    Summary {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Check a configuration file without touching any state
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config, output } => run_pulse(&config, output.as_ref()),
        Command::Summary { config } => run_summary(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Filesystem locations resolved from the [run] section.
struct RunPaths {
    data_dir: PathBuf,
    news_dir: Option<PathBuf>,
    ledger_path: PathBuf,
    history_dir: PathBuf,
    snapshot_path: PathBuf,
}

fn build_paths(adapter: &dyn ConfigPort) -> RunPaths {
    let state_dir = PathBuf::from(
        adapter
            .get_string("run", "state_dir")
            .unwrap_or_else(|| "state".to_string()),
    );
    RunPaths {
        data_dir: PathBuf::from(
            adapter
                .get_string("run", "data_dir")
                .unwrap_or_else(|| "data".to_string()),
        ),
        news_dir: adapter.get_string("run", "news_dir").map(PathBuf::from),
        ledger_path: state_dir.join("ledger.json"),
        history_dir: state_dir.join("history"),
        snapshot_path: PathBuf::from(
            adapter
                .get_string("run", "snapshot")
                .unwrap_or_else(|| "snapshot.json".to_string()),
        ),
    }
}

fn run_pulse(config_path: &PathBuf, output: Option<&PathBuf>) -> ExitCode {
    // Stage 1: Load and build config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let cfg = match build_pulse_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let paths = build_paths(&adapter);

    // Stage 2: Wire adapters and load persisted ledger
    let source = CsvBarSource::new(paths.data_dir.clone());
    let news: Box<dyn NewsSource> = match &paths.news_dir {
        Some(dir) => Box::new(FileNewsAdapter::new(dir.clone())),
        None => Box::new(NoNews),
    };
    let ledger_store = JsonLedgerStore::new(paths.ledger_path.clone());
    let mut ledger = ledger_store.load();

    // Stage 3: Run the pipeline
    let now = Utc::now();
    eprintln!("Processing {} symbols...", cfg.universe.len());
    let snapshot = match runner::run_pipeline(&source, news.as_ref(), &mut ledger, &cfg, now) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    for line in &snapshot.errors {
        eprintln!("warning: skipping {line}");
    }

    // Stage 4: Accumulate history
    let history = CsvHistoryStore::new(paths.history_dir.clone());
    for report in &snapshot.tickers {
        if let Err(e) = history.merge(&report.symbol, &report.history) {
            eprintln!("warning: history for {} not updated ({e})", report.symbol);
        }
    }

    // Stage 5: Persist ledger, then write the snapshot
    if let Err(e) = ledger_store.save(&ledger, now) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let out = output.cloned().unwrap_or_else(|| paths.snapshot_path.clone());
    if let Err(e) = snapshot_writer::write_snapshot(&out, &snapshot) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let summary = &snapshot.portfolio_summary;
    eprintln!("\n=== Portfolio ===");
    eprintln!("Cash:          {:.2}", summary.total_cash);
    eprintln!("Market Value:  {:.2}", summary.total_market_value);
    eprintln!("Total Value:   {:.2}", summary.total_value);
    eprintln!(
        "\n{} of {} symbols processed; snapshot written to {}",
        snapshot.tickers.len(),
        cfg.universe.len(),
        out.display()
    );
    ExitCode::SUCCESS
}

fn run_summary(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let cfg = match build_pulse_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let paths = build_paths(&adapter);

    let ledger = JsonLedgerStore::new(paths.ledger_path).load();
    if ledger.is_empty() {
        eprintln!("No portfolio state yet; run `marketpulse run` first");
        return ExitCode::SUCCESS;
    }

    for (symbol, entry) in &ledger {
        println!(
            "{}: {} shares @ {:.2}, cash {:.2}, total {:.2}",
            symbol,
            entry.shares,
            entry.avg_price,
            entry.cash,
            entry.total_value(),
        );
    }

    let summary = ledger::summarize(&ledger, cfg.initial_capital, Utc::now());
    println!(
        "total: cash {:.2}, market value {:.2}, value {:.2} (started with {:.2})",
        summary.total_cash, summary.total_market_value, summary.total_value, summary.initial_total,
    );
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let cfg = match build_pulse_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nUniverse:");
    for spec in &cfg.universe {
        if spec.market.is_empty() {
            eprintln!("  {} ({})", spec.symbol, spec.name);
        } else {
            eprintln!("  {} ({}, {})", spec.symbol, spec.name, spec.market);
        }
    }
    eprintln!("\nInitial capital per symbol: {:.2}", cfg.initial_capital);
    eprintln!(
        "Score thresholds: buy >= {}, sell <= {}",
        cfg.scoring.buy_threshold, cfg.scoring.sell_threshold
    );
    eprintln!("\nConfiguration is valid");
    ExitCode::SUCCESS
}

pub fn build_pulse_config(adapter: &dyn ConfigPort) -> Result<PulseConfig, PulseError> {
    let symbols_str =
        adapter
            .get_string("run", "symbols")
            .ok_or_else(|| PulseError::ConfigMissing {
                section: "run".into(),
                key: "symbols".into(),
            })?;
    let symbols: Vec<String> = symbols_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err(PulseError::ConfigInvalid {
            section: "run".into(),
            key: "symbols".into(),
            reason: "no symbols listed".into(),
        });
    }

    let universe = symbols
        .iter()
        .map(|sym| {
            let section = format!("symbol.{}", sym);
            SymbolSpec {
                symbol: sym.clone(),
                name: adapter
                    .get_string(&section, "name")
                    .unwrap_or_else(|| sym.clone()),
                market: adapter.get_string(&section, "market").unwrap_or_default(),
                currency: adapter.get_string(&section, "currency").unwrap_or_default(),
            }
        })
        .collect();

    let d = IndicatorConfig::default();
    let indicators = IndicatorConfig {
        sma_short: period(adapter, "sma_short", d.sma_short)?,
        sma_long: period(adapter, "sma_long", d.sma_long)?,
        rsi_period: period(adapter, "rsi_period", d.rsi_period)?,
        stoch_k_period: period(adapter, "stoch_k_period", d.stoch_k_period)?,
        stoch_d_period: period(adapter, "stoch_d_period", d.stoch_d_period)?,
        stoch_smooth: period(adapter, "stoch_smooth", d.stoch_smooth)?,
        macd_fast: period(adapter, "macd_fast", d.macd_fast)?,
        macd_slow: period(adapter, "macd_slow", d.macd_slow)?,
        macd_signal: period(adapter, "macd_signal", d.macd_signal)?,
    };

    let s = SignalConfig::default();
    let signals = SignalConfig {
        rsi_overbought: adapter.get_double("signals", "rsi_overbought", s.rsi_overbought),
        rsi_oversold: adapter.get_double("signals", "rsi_oversold", s.rsi_oversold),
        stoch_overbought: adapter.get_double("signals", "stoch_overbought", s.stoch_overbought),
        stoch_oversold: adapter.get_double("signals", "stoch_oversold", s.stoch_oversold),
    };

    let c = ScoreConfig::default();
    let scoring = ScoreConfig {
        baseline: adapter.get_int("scoring", "baseline", c.baseline as i64) as i32,
        trend_delta: adapter.get_int("scoring", "trend_delta", c.trend_delta as i64) as i32,
        rsi_delta: adapter.get_int("scoring", "rsi_delta", c.rsi_delta as i64) as i32,
        stoch_delta: adapter.get_int("scoring", "stoch_delta", c.stoch_delta as i64) as i32,
        macd_delta: adapter.get_int("scoring", "macd_delta", c.macd_delta as i64) as i32,
        buy_threshold: threshold(adapter, "buy_threshold", c.buy_threshold)?,
        sell_threshold: threshold(adapter, "sell_threshold", c.sell_threshold)?,
    };
    if scoring.sell_threshold >= scoring.buy_threshold {
        return Err(PulseError::ConfigInvalid {
            section: "scoring".into(),
            key: "sell_threshold".into(),
            reason: "must be below buy_threshold".into(),
        });
    }

    let initial_capital = adapter.get_double("portfolio", "initial_capital", 10_000_000.0);
    if !initial_capital.is_finite() || initial_capital < 0.0 {
        return Err(PulseError::ConfigInvalid {
            section: "portfolio".into(),
            key: "initial_capital".into(),
            reason: "must be a non-negative number".into(),
        });
    }

    Ok(PulseConfig {
        universe,
        initial_capital,
        indicators,
        signals,
        scoring,
        news_limit: adapter.get_int("run", "news_limit", 5).max(0) as usize,
    })
}

fn period(adapter: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, PulseError> {
    let value = adapter.get_int("indicators", key, default as i64);
    if value <= 0 {
        return Err(PulseError::ConfigInvalid {
            section: "indicators".into(),
            key: key.into(),
            reason: "must be a positive integer".into(),
        });
    }
    Ok(value as usize)
}

fn threshold(adapter: &dyn ConfigPort, key: &str, default: u8) -> Result<u8, PulseError> {
    let value = adapter.get_int("scoring", key, default as i64);
    if !(0..=100).contains(&value) {
        return Err(PulseError::ConfigInvalid {
            section: "scoring".into(),
            key: key.into(),
            reason: "must be between 0 and 100".into(),
        });
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = build_pulse_config(&adapter("[run]\nsymbols = AAPL\n")).unwrap();
        assert_eq!(cfg.universe.len(), 1);
        assert_eq!(cfg.universe[0].symbol, "AAPL");
        assert_eq!(cfg.universe[0].name, "AAPL");
        assert_eq!(cfg.initial_capital, 10_000_000.0);
        assert_eq!(cfg.indicators, IndicatorConfig::default());
        assert_eq!(cfg.scoring, ScoreConfig::default());
        assert_eq!(cfg.news_limit, 5);
    }

    #[test]
    fn symbols_list_is_split_and_trimmed() {
        let cfg = build_pulse_config(&adapter("[run]\nsymbols = 005930.KS , AAPL,, MSFT\n"))
            .unwrap();
        let symbols: Vec<&str> = cfg.universe.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["005930.KS", "AAPL", "MSFT"]);
    }

    #[test]
    fn symbol_metadata_sections_are_read() {
        let content = "\
[run]
symbols = 005930.KS

[symbol.005930.KS]
name = Samsung Electronics
market = KOSPI
currency = KRW
";
        let cfg = build_pulse_config(&adapter(content)).unwrap();
        assert_eq!(cfg.universe[0].name, "Samsung Electronics");
        assert_eq!(cfg.universe[0].market, "KOSPI");
        assert_eq!(cfg.universe[0].currency, "KRW");
    }

    #[test]
    fn missing_symbols_key_is_config_missing() {
        let err = build_pulse_config(&adapter("[run]\ndata_dir = data\n")).unwrap_err();
        assert!(matches!(
            err,
            PulseError::ConfigMissing { section, key } if section == "run" && key == "symbols"
        ));
    }

    #[test]
    fn empty_symbols_list_is_invalid() {
        let err = build_pulse_config(&adapter("[run]\nsymbols = , ,\n")).unwrap_err();
        assert!(matches!(err, PulseError::ConfigInvalid { .. }));
    }

    #[test]
    fn non_positive_period_is_invalid() {
        let err = build_pulse_config(&adapter(
            "[run]\nsymbols = AAPL\n\n[indicators]\nrsi_period = 0\n",
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            PulseError::ConfigInvalid { key, .. } if key == "rsi_period"
        ));
    }

    #[test]
    fn out_of_range_threshold_is_invalid() {
        let err = build_pulse_config(&adapter(
            "[run]\nsymbols = AAPL\n\n[scoring]\nbuy_threshold = 120\n",
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            PulseError::ConfigInvalid { key, .. } if key == "buy_threshold"
        ));
    }

    #[test]
    fn inverted_thresholds_are_invalid() {
        let err = build_pulse_config(&adapter(
            "[run]\nsymbols = AAPL\n\n[scoring]\nbuy_threshold = 30\nsell_threshold = 40\n",
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            PulseError::ConfigInvalid { key, .. } if key == "sell_threshold"
        ));
    }

    #[test]
    fn overrides_are_applied() {
        let content = "\
[run]
symbols = AAPL
news_limit = 3

[portfolio]
initial_capital = 50000

[indicators]
rsi_period = 21

[signals]
rsi_overbought = 75

[scoring]
buy_threshold = 70
";
        let cfg = build_pulse_config(&adapter(content)).unwrap();
        assert_eq!(cfg.news_limit, 3);
        assert_eq!(cfg.initial_capital, 50_000.0);
        assert_eq!(cfg.indicators.rsi_period, 21);
        assert_eq!(cfg.signals.rsi_overbought, 75.0);
        assert_eq!(cfg.scoring.buy_threshold, 70);
    }

    #[test]
    fn default_paths() {
        let paths = build_paths(&adapter("[run]\nsymbols = AAPL\n"));
        assert_eq!(paths.data_dir, PathBuf::from("data"));
        assert!(paths.news_dir.is_none());
        assert_eq!(paths.ledger_path, PathBuf::from("state/ledger.json"));
        assert_eq!(paths.history_dir, PathBuf::from("state/history"));
        assert_eq!(paths.snapshot_path, PathBuf::from("snapshot.json"));
    }

    #[test]
    fn configured_paths() {
        let content = "\
[run]
symbols = AAPL
data_dir = bars
news_dir = news
state_dir = var
snapshot = out/snapshot.json
";
        let paths = build_paths(&adapter(content));
        assert_eq!(paths.data_dir, PathBuf::from("bars"));
        assert_eq!(paths.news_dir, Some(PathBuf::from("news")));
        assert_eq!(paths.ledger_path, PathBuf::from("var/ledger.json"));
        assert_eq!(paths.snapshot_path, PathBuf::from("out/snapshot.json"));
    }
}
