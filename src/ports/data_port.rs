//! Time-series access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::PulseError;

/// Supplies the ordered bar series for a symbol.
///
/// Implementations must return ascending, duplicate-free bars. An empty
/// result is a terminal condition for that symbol this run; any failure is
/// opaque to the core and treated as "security unavailable".
pub trait BarSource {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, PulseError>;
}
