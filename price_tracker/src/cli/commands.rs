use std::path::PathBuf;

use clap::Parser;

use crate::{config::Config, models::date_range::Lookback};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fetch daily prices for a ticker, chart them and write a text report"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ticker symbol to track, e.g. AAPL (prompted for when omitted)
    #[arg(short, long)]
    pub ticker: Option<String>,

    /// Number of calendar days to look back (prompted for when omitted)
    #[arg(short, long)]
    pub days: Option<Lookback>,

    /// Where to write the text report [default: stock_data.txt]
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Where to save the chart [default: stock_chart.png]
    #[arg(long, value_name = "FILE")]
    pub chart: Option<PathBuf>,

    /// Save the chart without opening it
    #[arg(long)]
    pub no_show: bool,

    /// Leave the terminal contents in place on start
    #[arg(long)]
    pub no_clear: bool,

    /// Log level: trace, debug, info, warn or error. RUST_LOG takes precedence.
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Layers the command-line overrides onto `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(path) = &self.report {
            config.output.report_path = path.clone();
        }
        if let Some(path) = &self.chart {
            config.output.chart_path = path.clone();
        }
        if self.no_show {
            config.chart.show = false;
        }
        config
    }
}
