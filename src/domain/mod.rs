//! Core domain types and logic.

pub mod bar;
pub mod config;
pub mod indicator;
pub mod signal;
pub mod recommendation;
pub mod ledger;
pub mod snapshot;
pub mod runner;
pub mod error;
