//! Concrete adapters behind the port traits: CSV bars and history, JSON
//! ledger and news files, snapshot output.

pub mod csv_bar_source;
pub mod csv_history_store;
pub mod file_config_adapter;
pub mod file_news_adapter;
pub mod json_ledger_store;
pub mod snapshot_writer;

/// Filesystem-safe stem for a symbol: dots become underscores, so
/// `005930.KS` maps to `005930_KS`.
pub(crate) fn symbol_file_stem(symbol: &str) -> String {
    symbol.replace('.', "_")
}
