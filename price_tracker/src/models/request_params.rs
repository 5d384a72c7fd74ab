use crate::models::date_range::DateRange;

/// Parameters for one daily-bars request.
///
/// Vendor-agnostic: each [`DataProvider`](crate::providers::DataProvider)
/// maps these onto its own URL and query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarsRequestParams {
    /// Upper-case ticker symbol, e.g. `AAPL`.
    pub symbol: String,

    /// Calendar days to cover, both ends inclusive.
    pub range: DateRange,

    /// Whether prices are adjusted for splits.
    pub adjusted: bool,
}

impl BarsRequestParams {
    /// Ascending, split-adjusted daily bars for `symbol` over `range`.
    ///
    /// The symbol is trimmed and upper-cased.
    pub fn daily(symbol: &str, range: DateRange) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            range,
            adjusted: true,
        }
    }
}
