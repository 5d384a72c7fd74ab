use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::bar_series::BarSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// There was nothing to write.
    #[snafu(display("No data to write for {symbol}"))]
    EmptySeries {
        symbol: String,
        backtrace: Backtrace,
    },

    /// An error occurred while turning the series into the output format (e.g. drawing the chart).
    #[snafu(display("Failed to render {what}: {message}"))]
    Render {
        what: &'static str,
        message: String,
        backtrace: Backtrace,
    },

    /// The output file could not be written.
    #[snafu(display("Failed to write {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// Both file sinks in this crate return the `PathBuf` they wrote.
    type Output;

    /// Writes one `BarSeries` to the destination.
    async fn write(&self, data: &BarSeries) -> Result<Self::Output, SinkError>;
}
