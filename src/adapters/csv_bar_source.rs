//! CSV file bar source.
//!
//! One file per symbol under a base directory, named `<stem>.csv` where the
//! stem is the symbol with dots replaced by underscores. Rows carry RFC 3339
//! timestamps and are normalized on read: sorted ascending, duplicate
//! timestamps collapsed to the last occurrence, rows with non-finite or
//! non-positive prices dropped.

use std::path::PathBuf;

use crate::adapters::symbol_file_stem;
use crate::domain::bar::Bar;
use crate::domain::error::PulseError;
use crate::ports::data_port::BarSource;

pub struct CsvBarSource {
    base_path: PathBuf,
}

impl CsvBarSource {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.csv", symbol_file_stem(symbol)))
    }
}

impl BarSource for CsvBarSource {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, PulseError> {
        let path = self.csv_path(symbol);
        if !path.is_file() {
            return Err(PulseError::DataUnavailable {
                symbol: symbol.to_string(),
            });
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(|e| PulseError::Store {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let mut bars = Vec::new();
        for result in rdr.deserialize::<Bar>() {
            let bar = result.map_err(|e| PulseError::Store {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            if bar.is_sane() {
                bars.push(bar);
            }
        }

        bars.sort_by_key(|b| b.timestamp);
        // keep the last row for a repeated timestamp
        bars.reverse();
        bars.dedup_by_key(|b| b.timestamp);
        bars.reverse();

        Ok(bars)
    }
}
