//! Calendar-day request windows.

use chrono::{Duration, Local, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookbackError {
    #[error("Number of days must be a whole number, got {0:?}")]
    NotANumber(String),

    #[error("Number of days must be at least 1, got {0}")]
    NotPositive(i64),

    #[error("Number of days must be at most {max}, got {0}", max = Lookback::MAX_DAYS)]
    TooLarge(i64),
}

/// Number of calendar days before today to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback(u32);

impl Lookback {
    /// Longest accepted window, about a century. Keeps `today - days` well
    /// inside the calendar `chrono` can represent.
    pub const MAX_DAYS: u32 = 36_600;

    pub fn new(days: u32) -> Result<Self, LookbackError> {
        if days == 0 {
            return Err(LookbackError::NotPositive(0));
        }
        if days > Self::MAX_DAYS {
            return Err(LookbackError::TooLarge(i64::from(days)));
        }
        Ok(Self(days))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    /// Spacing in days between x-axis labels: one label per ~15th of the window.
    pub fn label_interval(self) -> u32 {
        (self.0 / 15).max(1)
    }
}

impl std::str::FromStr for Lookback {
    type Err = LookbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| LookbackError::NotANumber(s.trim().to_string()))?;
        if n < 1 {
            return Err(LookbackError::NotPositive(n));
        }
        let days = u32::try_from(n).map_err(|_| LookbackError::TooLarge(n))?;
        Self::new(days)
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The window of `lookback` days ending on `end`.
    pub fn ending_on(end: NaiveDate, lookback: Lookback) -> Self {
        Self {
            start: end - Duration::days(i64::from(lookback.days())),
            end,
        }
    }

    /// The window of `lookback` days ending today, in local time.
    pub fn ending_today(lookback: Lookback) -> Self {
        Self::ending_on(Local::now().date_naive(), lookback)
    }

    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
