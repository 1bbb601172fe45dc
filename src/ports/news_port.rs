//! News access port trait.

use crate::domain::snapshot::Article;

/// Best-effort recent article metadata for a symbol.
///
/// Infallible by contract: implementations degrade to an empty list on any
/// failure so news can never affect indicator, recommendation or ledger
/// correctness.
pub trait NewsSource {
    fn recent(&self, symbol: &str, limit: usize) -> Vec<Article>;
}

/// The no-news source, used when no news directory is configured.
pub struct NoNews;

impl NewsSource for NoNews {
    fn recent(&self, _symbol: &str, _limit: usize) -> Vec<Article> {
        Vec::new()
    }
}
