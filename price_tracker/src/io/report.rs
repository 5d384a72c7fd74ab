//! Fixed-width plain-text report of a [`BarSeries`].

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use snafu::{ResultExt, ensure};
use tracing::info;

use crate::{
    io::sink::{DataSink, EmptySeriesSnafu, IoSnafu, SinkError},
    models::bar_series::BarSeries,
};

pub const DEFAULT_REPORT_PATH: &str = "stock_data.txt";

const TITLE_RULE: usize = 50;
const HEADER_RULE: usize = 60;

/// Writes the report to a text file, overwriting it.
pub struct TextReportSink {
    path: PathBuf,
}

impl TextReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSink for TextReportSink {
    type Output = PathBuf;

    async fn write(&self, data: &BarSeries) -> Result<PathBuf, SinkError> {
        ensure!(
            !data.is_empty(),
            EmptySeriesSnafu {
                symbol: data.symbol.as_str()
            }
        );

        let text = render_report(data, Local::now().naive_local());
        tokio::fs::write(&self.path, text)
            .await
            .context(IoSnafu { path: &self.path })?;

        info!(path = %self.path.display(), rows = data.bars.len(), "wrote report");
        Ok(self.path.clone())
    }
}

/// Renders the report text. Rows follow the order of `series.bars`.
pub fn render_report(series: &BarSeries, retrieved_at: NaiveDateTime) -> String {
    let mut out = String::from("Stock Data\n");
    out.push_str(&format!("{}\n", "=".repeat(TITLE_RULE)));
    out.push_str(&format!(
        "Data retrieved on: {}\n\n",
        retrieved_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "{:<12} {:<8} {:<8} {:<8} {:<8} {:<12}\n",
        "Date", "Open", "High", "Low", "Close", "Volume"
    ));
    out.push_str(&format!("{}\n", "-".repeat(HEADER_RULE)));

    for bar in &series.bars {
        out.push_str(&format!(
            "{:<12} {:<8.2} {:<8.2} {:<8.2} {:<8.2} {:<12}\n",
            bar.date_str(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }

    out
}
