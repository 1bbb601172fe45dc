//! Paper-trading portfolio ledger.
//!
//! One entry per security, mutated at most once per run by [`apply_action`].
//! Policy is deliberately simple and preserved exactly: a buy spends all
//! available cash in whole units, a sell liquidates the entire position, no
//! partial sells, no fees, no slippage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::recommendation::TradeAction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TradeAction,
    pub units: u64,
    pub price: f64,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub cash: f64,
    pub shares: u64,
    pub avg_price: f64,
    pub last_action: Option<Transaction>,
    pub last_price: Option<f64>,
}

impl PortfolioEntry {
    /// Fresh entry: configured starting cash, no position.
    pub fn new(initial_cash: f64) -> Self {
        PortfolioEntry {
            cash: initial_cash,
            shares: 0,
            avg_price: 0.0,
            last_action: None,
            last_price: None,
        }
    }

    /// shares × last known price, 0 when the price was never seen.
    pub fn market_value(&self) -> f64 {
        self.shares as f64 * self.last_price.unwrap_or(0.0)
    }

    pub fn total_value(&self) -> f64 {
        self.cash + self.market_value()
    }
}

/// Ledger state keyed by symbol. BTreeMap keeps persisted output stable so
/// writing identical state twice yields identical bytes.
pub type LedgerState = BTreeMap<String, PortfolioEntry>;

/// Aggregate across all entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_cash: f64,
    pub total_market_value: f64,
    pub total_value: f64,
    pub initial_capital_per_symbol: f64,
    pub initial_total: f64,
    pub updated_at: DateTime<Utc>,
}

/// Apply one recommended action at `price`, recording exactly one
/// transaction. Cash and average price end up rounded to 2 decimals and the
/// `shares == 0 ⇒ avg_price == 0` invariant holds on exit.
pub fn apply_action(
    entry: &mut PortfolioEntry,
    price: f64,
    action: TradeAction,
    timestamp: DateTime<Utc>,
) -> Transaction {
    // A broken price never trades; a non-finite one is not even recorded.
    if !price.is_finite() || price <= 0.0 {
        let txn = Transaction {
            kind: TradeAction::Hold,
            units: 0,
            price: 0.0,
            value: 0.0,
            timestamp,
        };
        if price.is_finite() {
            entry.last_price = Some(price);
        }
        entry.last_action = Some(txn.clone());
        return txn;
    }

    let txn = match action {
        TradeAction::Buy => {
            let units = (entry.cash / price).floor() as u64;
            if units == 0 {
                hold_txn(price, timestamp)
            } else {
                let cost = units as f64 * price;
                entry.avg_price = (entry.shares as f64 * entry.avg_price + cost)
                    / (entry.shares + units) as f64;
                entry.shares += units;
                entry.cash -= cost;
                Transaction {
                    kind: TradeAction::Buy,
                    units,
                    price,
                    value: cost,
                    timestamp,
                }
            }
        }
        TradeAction::Sell => {
            if entry.shares == 0 {
                hold_txn(price, timestamp)
            } else {
                let units = entry.shares;
                let proceeds = units as f64 * price;
                entry.cash += proceeds;
                entry.shares = 0;
                entry.avg_price = 0.0;
                Transaction {
                    kind: TradeAction::Sell,
                    units,
                    price,
                    value: proceeds,
                    timestamp,
                }
            }
        }
        TradeAction::Hold => hold_txn(price, timestamp),
    };

    entry.cash = round2(entry.cash);
    entry.avg_price = if entry.shares == 0 {
        0.0
    } else {
        round2(entry.avg_price)
    };
    entry.last_price = Some(price);
    entry.last_action = Some(txn.clone());
    txn
}

fn hold_txn(price: f64, timestamp: DateTime<Utc>) -> Transaction {
    Transaction {
        kind: TradeAction::Hold,
        units: 0,
        price,
        value: 0.0,
        timestamp,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Sum cash and market value over all entries.
pub fn summarize(
    entries: &LedgerState,
    initial_capital_per_symbol: f64,
    updated_at: DateTime<Utc>,
) -> PortfolioSummary {
    let total_cash: f64 = entries.values().map(|e| e.cash).sum();
    let total_market_value: f64 = entries.values().map(|e| e.market_value()).sum();
    PortfolioSummary {
        total_cash,
        total_market_value,
        total_value: total_cash + total_market_value,
        initial_capital_per_symbol,
        initial_total: initial_capital_per_symbol * entries.len() as f64,
        updated_at,
    }
}
