//! The bars fetched for one ticker during one run.

use crate::models::bar::PriceBar;

/// Daily bars for a single symbol, in ascending date order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The collection of OHLCV bars.
    pub bars: Vec<PriceBar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Lowest `low` across the series, `None` when empty.
    pub fn min_low(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.low).reduce(f64::min)
    }

    /// Highest `high` across the series, `None` when empty.
    pub fn max_high(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.high).reduce(f64::max)
    }
}
