//! JSON ledger store: persists portfolio state across runs.
//!
//! The on-disk document is `{ "updated_at": ..., "symbols": { <symbol>:
//! <entry> } }`. Loading never fails the run: a missing file starts fresh
//! and a malformed one is abandoned with a warning, so a broken state file
//! can only cost paper positions, not the snapshot.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::PulseError;
use crate::domain::ledger::LedgerState;

#[derive(Serialize, Deserialize)]
struct LedgerDocument {
    updated_at: DateTime<Utc>,
    symbols: LedgerState,
}

pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted state, degrading to an empty ledger on any
    /// problem.
    pub fn load(&self) -> LedgerState {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return LedgerState::new(),
        };
        match serde_json::from_str::<LedgerDocument>(&content) {
            Ok(doc) => doc.symbols,
            Err(e) => {
                eprintln!(
                    "Warning: ledger file {} is unreadable ({}), starting from defaults",
                    self.path.display(),
                    e
                );
                LedgerState::new()
            }
        }
    }

    /// Write the full state, replacing whatever was there.
    pub fn save(&self, state: &LedgerState, updated_at: DateTime<Utc>) -> Result<(), PulseError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let doc = LedgerDocument {
            updated_at,
            symbols: state.clone(),
        };
        let json = serde_json::to_string_pretty(&doc).map_err(|e| PulseError::Store {
            reason: format!("ledger serialization failed: {}", e),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
