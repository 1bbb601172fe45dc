//! Snapshot output: pretty-printed JSON for the dashboard.

use std::fs;
use std::path::Path;

use crate::domain::error::PulseError;
use crate::domain::snapshot::RunSnapshot;

pub fn write_snapshot<P: AsRef<Path>>(path: P, snapshot: &RunSnapshot) -> Result<(), PulseError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot).map_err(|e| PulseError::Store {
        reason: format!("snapshot serialization failed: {}", e),
    })?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn empty_snapshot() -> RunSnapshot {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        RunSnapshot {
            generated_at: now,
            tickers: Vec::new(),
            portfolio_summary: ledger::summarize(&Default::default(), 0.0, now),
            errors: Vec::new(),
        }
    }

    #[test]
    fn writes_parseable_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/snapshot.json");

        write_snapshot(&path, &empty_snapshot()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("generated_at").is_some());
        assert!(value.get("portfolio_summary").is_some());
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");

        write_snapshot(&path, &empty_snapshot()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        write_snapshot(&path, &empty_snapshot()).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }
}
