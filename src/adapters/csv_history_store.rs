//! CSV history store: accumulates fetched bars across runs.
//!
//! Merging is idempotent. Existing rows and incoming bars are keyed by
//! timestamp, incoming bars win on conflict, and the whole file is rewritten
//! sorted ascending. Running the same merge twice leaves the file unchanged.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::adapters::symbol_file_stem;
use crate::domain::bar::Bar;
use crate::domain::error::PulseError;

pub struct CsvHistoryStore {
    base_path: PathBuf,
}

impl CsvHistoryStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.csv", symbol_file_stem(symbol)))
    }

    /// Merge `bars` into the stored history for `symbol`, returning the row
    /// count after the merge.
    pub fn merge(&self, symbol: &str, bars: &[Bar]) -> Result<usize, PulseError> {
        let path = self.csv_path(symbol);
        let mut by_timestamp: BTreeMap<DateTime<Utc>, Bar> = BTreeMap::new();

        if path.is_file() {
            let mut rdr = csv::Reader::from_path(&path).map_err(|e| PulseError::Store {
                reason: format!("failed to open {}: {}", path.display(), e),
            })?;
            for result in rdr.deserialize::<Bar>() {
                let bar = result.map_err(|e| PulseError::Store {
                    reason: format!("CSV parse error in {}: {}", path.display(), e),
                })?;
                by_timestamp.insert(bar.timestamp, bar);
            }
        }

        for bar in bars {
            by_timestamp.insert(bar.timestamp, bar.clone());
        }

        fs::create_dir_all(&self.base_path)?;
        let mut wtr = csv::Writer::from_path(&path).map_err(|e| PulseError::Store {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;
        for bar in by_timestamp.values() {
            wtr.serialize(bar).map_err(|e| PulseError::Store {
                reason: format!("CSV write error in {}: {}", path.display(), e),
            })?;
        }
        wtr.flush()?;

        Ok(by_timestamp.len())
    }

    /// Stored history for `symbol`, empty when no file exists yet.
    pub fn load(&self, symbol: &str) -> Result<Vec<Bar>, PulseError> {
        let path = self.csv_path(symbol);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| PulseError::Store {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;
        let mut bars = Vec::new();
        for result in rdr.deserialize::<Bar>() {
            bars.push(result.map_err(|e| PulseError::Store {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?);
        }
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn merge_into_empty_store_writes_all_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CsvHistoryStore::new(dir.path().to_path_buf());

        let count = store.merge("AAA", &[bar(1, 10.0), bar(2, 11.0)]).unwrap();
        assert_eq!(count, 2);

        let bars = store.load("AAA").unwrap();
        assert_eq!(bars, vec![bar(1, 10.0), bar(2, 11.0)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CsvHistoryStore::new(dir.path().to_path_buf());

        store.merge("AAA", &[bar(1, 10.0), bar(2, 11.0)]).unwrap();
        let first = fs::read_to_string(dir.path().join("AAA.csv")).unwrap();

        store.merge("AAA", &[bar(1, 10.0), bar(2, 11.0)]).unwrap();
        let second = fs::read_to_string(dir.path().join("AAA.csv")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn incoming_bars_win_on_conflict() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CsvHistoryStore::new(dir.path().to_path_buf());

        store.merge("AAA", &[bar(1, 10.0)]).unwrap();
        let count = store.merge("AAA", &[bar(1, 99.0), bar(2, 11.0)]).unwrap();

        assert_eq!(count, 2);
        let bars = store.load("AAA").unwrap();
        assert_eq!(bars[0].close, 99.0);
        assert_eq!(bars[1].close, 11.0);
    }

    #[test]
    fn merge_sorts_unordered_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CsvHistoryStore::new(dir.path().to_path_buf());

        store.merge("AAA", &[bar(3, 12.0), bar(1, 10.0)]).unwrap();
        let bars = store.load("AAA").unwrap();
        assert_eq!(
            bars.iter().map(|b| b.close).collect::<Vec<_>>(),
            vec![10.0, 12.0]
        );
    }

    #[test]
    fn symbol_with_dot_maps_to_underscore_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CsvHistoryStore::new(dir.path().to_path_buf());

        store.merge("005930.KS", &[bar(1, 10.0)]).unwrap();
        assert!(dir.path().join("005930_KS.csv").is_file());
    }
}
