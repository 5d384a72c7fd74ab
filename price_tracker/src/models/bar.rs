//! Canonical in-memory representation of a daily price bar (OHLCV).
//!
//! This struct is the standard output of every [`DataProvider`](crate::providers::DataProvider)
//! and the sole input of the report and chart sinks.

use chrono::{DateTime, NaiveDate, Utc};

/// Format used for the display date of a bar.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rounds a currency amount to 2 decimal places, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A single daily bar for one trading day.
///
/// Prices are rounded to cents on construction, and volume is stored as a
/// whole share count.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    /// The timestamp the provider reported for this bar (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the day.
    pub high: f64,

    /// Lowest price during the day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the day.
    pub volume: u64,
}

impl PriceBar {
    /// Builds a bar from raw provider values.
    ///
    /// Prices are rounded to 2 decimals. Fractional volumes are rounded to the
    /// nearest share and negative volumes clamp to zero.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open: round_cents(open),
            high: round_cents(high),
            low: round_cents(low),
            close: round_cents(close),
            volume: volume.max(0.0).round() as u64,
        }
    }

    /// The calendar day this bar belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// The display form of [`PriceBar::date`], e.g. `2024-03-15`.
    pub fn date_str(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }
}
