//! One run of the tracker: credentials, fetch, report, chart.
//!
//! Every stage catches its own failure, logs it, and hands `None` to the next
//! stage. Nothing past this module sees a provider or sink error; the only
//! errors [`run`] returns are console I/O failures.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::{
    cli::prompt::prompt_line,
    config::Config,
    credentials::resolve_api_key,
    errors::Error,
    io::{
        chart::ChartSink,
        report::TextReportSink,
        sink::{DataSink, SinkError},
        viewer,
    },
    models::{
        bar_series::BarSeries,
        date_range::{DateRange, Lookback},
        request_params::BarsRequestParams,
    },
    providers::{DataProvider, polygon_rest::PolygonProvider},
};

const BANNER: &str = "=== Stock Price Tracker ===";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
pub const TICKER_PROMPT: &str = "\nEnter a Ticker to Track: ";
pub const DAYS_PROMPT: &str = "Enter Number of Days: ";

/// Everything a run needs besides the console.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub config: Config,
    /// Ticker given on the command line; prompted for when `None`.
    pub ticker: Option<String>,
    /// Lookback given on the command line; prompted for when `None`.
    pub lookback: Option<Lookback>,
    pub clear_screen: bool,
}

/// What a successful fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub symbol: String,
    pub bars: usize,
    /// Path of the report, `None` if writing it failed.
    pub report: Option<PathBuf>,
    /// Path of the chart, `None` if rendering it failed.
    pub chart: Option<PathBuf>,
}

/// Runs the tracker against Polygon.io.
///
/// Returns `Ok(None)` when the run stopped early: no API key, bad input, or a
/// failed fetch. The reason has been logged and summarised on `output`.
pub async fn run<R: BufRead, W: Write>(
    settings: &Settings,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<Outcome>> {
    if settings.clear_screen {
        write!(output, "{CLEAR_SCREEN}")?;
    }
    writeln!(output, "{BANNER}\n")?;

    let Some(api_key) = resolve_api_key(&settings.config.api.key_env, input, output)? else {
        writeln!(output, "Exiting...")?;
        return Ok(None);
    };

    let provider =
        match PolygonProvider::with_base_url(api_key, settings.config.api.base_url.clone()) {
            Ok(provider) => provider,
            Err(e) => {
                error!("{e}");
                writeln!(output, "Exiting...")?;
                return Ok(None);
            }
        };

    run_with_provider(&provider, settings, input, output).await
}

/// The part of [`run`] after credentials, against any provider.
pub async fn run_with_provider<P, R, W>(
    provider: &P,
    settings: &Settings,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<Outcome>>
where
    P: DataProvider + ?Sized,
    R: BufRead,
    W: Write,
{
    let (symbol, lookback) = match read_request(settings, input, output) {
        Ok(request) => request,
        Err(Error::Io(e)) => return Err(e),
        Err(e) => {
            error!("{e}");
            writeln!(output, "Exiting...")?;
            return Ok(None);
        }
    };

    let Some(series) = fetch_stock_data(provider, &symbol, lookback).await else {
        writeln!(output, "Failed to retrieve data")?;
        return Ok(None);
    };
    writeln!(output, "\nSuccessfully retrieved data for {}", series.symbol)?;

    let config = &settings.config;
    let report = save_report(
        Some(&series),
        &TextReportSink::new(&config.output.report_path),
    )
    .await;

    let chart_sink = ChartSink::new(
        &config.output.chart_path,
        lookback,
        (config.chart.width, config.chart.height),
    );
    let chart = create_chart(Some(&series), &chart_sink).await;

    if let Some(path) = &chart {
        if config.chart.show {
            if let Err(e) = viewer::show(path) {
                warn!("Could not open {}: {e}", path.display());
            }
        }
    }

    Ok(Some(Outcome {
        symbol: series.symbol.clone(),
        bars: series.bars.len(),
        report,
        chart,
    }))
}

/// Ticker and lookback, from settings or prompts. The ticker is upper-cased.
fn read_request<R: BufRead, W: Write>(
    settings: &Settings,
    input: &mut R,
    output: &mut W,
) -> Result<(String, Lookback), Error> {
    let ticker = match &settings.ticker {
        Some(t) => t.clone(),
        None => prompt_line(input, output, TICKER_PROMPT)?,
    };
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(Error::EmptyTicker);
    }

    let lookback = match settings.lookback {
        Some(l) => l,
        None => prompt_line(input, output, DAYS_PROMPT)?.parse()?,
    };
    Ok((ticker, lookback))
}

/// Fetches `lookback` days of bars ending today.
///
/// Any failure, including a provider that reports success with no bars, is
/// logged and yields `None`.
pub async fn fetch_stock_data<P: DataProvider + ?Sized>(
    provider: &P,
    symbol: &str,
    lookback: Lookback,
) -> Option<BarSeries> {
    let range = DateRange::ending_today(lookback);
    let params = BarsRequestParams::daily(symbol, range);
    info!(symbol = %params.symbol, start = %range.start, end = %range.end, "fetching daily bars");

    match provider.fetch_bars(params).await {
        Ok(series) if series.is_empty() => {
            error!("No data found in API response for {}", series.symbol);
            None
        }
        Ok(mut series) => {
            series.bars.sort_by_key(|b| b.timestamp);
            Some(series)
        }
        Err(e) => {
            error!("{e}");
            None
        }
    }
}

/// Writes the text report. Absence and write failures are logged, not raised.
pub async fn save_report(series: Option<&BarSeries>, sink: &TextReportSink) -> Option<PathBuf> {
    write_logged(sink, series, "No data to save", "Error saving file").await
}

/// Renders the chart. Absence and rendering failures are logged, not raised.
pub async fn create_chart(series: Option<&BarSeries>, sink: &ChartSink) -> Option<PathBuf> {
    write_logged(sink, series, "No data to graph", "Error creating graph").await
}

async fn write_logged<S>(
    sink: &S,
    series: Option<&BarSeries>,
    when_absent: &str,
    on_error: &str,
) -> Option<PathBuf>
where
    S: DataSink<Output = PathBuf> + Sync,
{
    let Some(series) = series else {
        warn!("{when_absent}");
        return None;
    };

    match sink.write(series).await {
        Ok(path) => Some(path),
        Err(e @ SinkError::EmptySeries { .. }) => {
            warn!("{when_absent}: {e}");
            None
        }
        Err(e) => {
            error!("{on_error}: {e}");
            None
        }
    }
}
