//! Run output snapshot types, the document the dashboard consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::bar::Bar;
use crate::domain::indicator::IndicatorSet;
use crate::domain::ledger::{PortfolioEntry, PortfolioSummary, Transaction};
use crate::domain::recommendation::Recommendation;
use crate::domain::signal::SignalSet;

/// Best-effort news article metadata; any field may be missing upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Position view embedded per ticker, precomputed for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioView {
    pub cash: f64,
    pub shares: u64,
    pub average_price: f64,
    pub market_value: f64,
    pub total_value: f64,
    pub last_action: Option<Transaction>,
}

impl PortfolioView {
    pub fn from_entry(entry: &PortfolioEntry) -> Self {
        PortfolioView {
            cash: entry.cash,
            shares: entry.shares,
            average_price: entry.avg_price,
            market_value: entry.market_value(),
            total_value: entry.total_value(),
            last_action: entry.last_action.clone(),
        }
    }
}

/// Per-security payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReport {
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub currency: String,
    pub history: Vec<Bar>,
    pub indicators: IndicatorSet,
    pub signals: SignalSet,
    pub recommendation: Recommendation,
    pub portfolio: PortfolioView,
    pub news: Vec<Article>,
}

/// The whole run in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub generated_at: DateTime<Utc>,
    pub tickers: Vec<TickerReport>,
    pub portfolio_summary: PortfolioSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
