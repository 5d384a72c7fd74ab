use thiserror::Error;

use crate::models::date_range::LookbackError;

/// Errors from collecting the ticker and lookback for a run.
///
/// Provider and sink failures have their own types in
/// [`providers`](crate::providers) and [`io::sink`](crate::io::sink).
#[derive(Debug, Error)]
pub enum Error {
    /// The number of days entered was not usable.
    #[error("Invalid number of days: {0}")]
    Lookback(#[from] LookbackError),

    /// No ticker was entered.
    #[error("A ticker symbol is required")]
    EmptyTicker,

    /// Reading from or writing to the console failed.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
