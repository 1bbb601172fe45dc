#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use marketpulse::domain::bar::Bar;
use marketpulse::domain::error::PulseError;
use marketpulse::domain::snapshot::Article;
use marketpulse::ports::data_port::BarSource;
use marketpulse::ports::news_port::NewsSource;
use std::collections::HashMap;

pub struct MockBarSource {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockBarSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl BarSource for MockBarSource {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, PulseError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(PulseError::Store {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) => Ok(bars.clone()),
            None => Err(PulseError::DataUnavailable {
                symbol: symbol.to_string(),
            }),
        }
    }
}

pub struct MockNewsSource {
    pub articles: HashMap<String, Vec<Article>>,
}

impl MockNewsSource {
    pub fn new() -> Self {
        Self {
            articles: HashMap::new(),
        }
    }

    pub fn with_articles(mut self, symbol: &str, titles: &[&str]) -> Self {
        let articles = titles
            .iter()
            .map(|t| Article {
                title: Some(t.to_string()),
                publisher: None,
                link: None,
                published_at: None,
            })
            .collect();
        self.articles.insert(symbol.to_string(), articles);
        self
    }
}

impl NewsSource for MockNewsSource {
    fn recent(&self, symbol: &str, limit: usize) -> Vec<Article> {
        let mut articles = self.articles.get(symbol).cloned().unwrap_or_default();
        articles.truncate(limit);
        articles
    }
}

pub fn day(index: usize) -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200 + index as i64 * 86_400, 0)
        .unwrap()
}

pub fn make_bar(index: usize, close: f64) -> Bar {
    Bar {
        timestamp: day(index),
        open: close,
        high: close + 1.0,
        low: (close - 1.0).max(0.0),
        close,
        volume: 10_000.0,
    }
}

/// Monotonically rising closes, long enough for every indicator at the
/// default periods.
pub fn rising_series(count: usize) -> Vec<Bar> {
    (0..count).map(|i| make_bar(i, 100.0 + i as f64)).collect()
}

/// Bars serialized the way the CSV adapters write them.
pub fn bars_to_csv(bars: &[Bar]) -> String {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for bar in bars {
        wtr.serialize(bar).unwrap();
    }
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}
