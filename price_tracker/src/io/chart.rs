//! PNG price chart: close line over a shaded high/low band.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use snafu::ensure;
use tracing::info;

use crate::{
    io::sink::{DataSink, EmptySeriesSnafu, RenderSnafu, SinkError},
    models::{bar_series::BarSeries, date_range::Lookback},
};

pub const DEFAULT_CHART_PATH: &str = "stock_chart.png";

const CLOSE_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const BAND_COLOR: RGBColor = RGBColor(173, 216, 230);

/// Fraction of headroom added below the lowest low and above the highest high.
const Y_PADDING: f64 = 0.005;

/// Renders a [`BarSeries`] as a PNG.
pub struct ChartSink {
    path: PathBuf,
    lookback: Lookback,
    size: (u32, u32),
}

impl ChartSink {
    pub fn new(path: impl Into<PathBuf>, lookback: Lookback, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            lookback,
            size,
        }
    }

    /// `{SYMBOL} Stock Price - Last {N} Days`
    pub fn title(&self, symbol: &str) -> String {
        format!("{symbol} Stock Price - Last {} Days", self.lookback)
    }

    fn render(&self, data: &BarSeries) -> Result<(), SinkError> {
        let first_date = data.bars[0].date();
        let offset = |d: NaiveDate| (d - first_date).num_days();

        let last_offset = data.latest().map_or(0, |b| offset(b.date()));
        let (y_min, y_max) = y_bounds(data);
        let key_points = x_key_points(last_offset, self.lookback.label_interval());

        let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                self.title(&data.symbol),
                ("sans-serif", 28).into_font().style(FontStyle::Bold),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(
                (0i64..last_offset.max(1)).with_key_points(key_points),
                y_min..y_max,
            )
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Price ($)")
            .axis_desc_style(("sans-serif", 16))
            .x_label_formatter(&|o: &i64| (first_date + Duration::days(*o)).format("%m/%d").to_string())
            .y_label_formatter(&|p: &f64| format!("{p:.2}"))
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(BLACK.mix(0.05))
            .draw()
            .map_err(render_error)?;

        // Band outline: highs left to right, then lows right to left.
        let band: Vec<(i64, f64)> = data
            .bars
            .iter()
            .map(|b| (offset(b.date()), b.high))
            .chain(data.bars.iter().rev().map(|b| (offset(b.date()), b.low)))
            .collect();

        chart
            .draw_series(std::iter::once(Polygon::new(
                band,
                BAND_COLOR.mix(0.3).filled(),
            )))
            .map_err(render_error)?
            .label("Daily Range (High-Low)")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BAND_COLOR.filled()));

        chart
            .draw_series(LineSeries::new(
                data.bars.iter().map(|b| (offset(b.date()), b.close)),
                CLOSE_COLOR.stroke_width(2),
            ))
            .map_err(render_error)?
            .label("Close Price")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CLOSE_COLOR.stroke_width(2)));

        if let Some(latest) = data.latest() {
            let label = latest_label(latest.close);
            let box_width = label.len() as i32 * 9 + 10;
            chart
                .draw_series(std::iter::once(
                    EmptyElement::at((offset(latest.date()), latest.close))
                        + Circle::new((0, 0), 4, CLOSE_COLOR.filled())
                        + PathElement::new(vec![(0, 0), (10, -10)], BLACK.stroke_width(1))
                        + Rectangle::new([(10, -34), (10 + box_width, -10)], YELLOW.mix(0.7).filled())
                        + Text::new(label, (15, -30), ("sans-serif", 16).into_font()),
                ))
                .map_err(render_error)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        Ok(())
    }
}

#[async_trait]
impl DataSink for ChartSink {
    type Output = PathBuf;

    async fn write(&self, data: &BarSeries) -> Result<PathBuf, SinkError> {
        ensure!(
            !data.is_empty(),
            EmptySeriesSnafu {
                symbol: data.symbol.as_str()
            }
        );

        self.render(data)?;
        info!(path = %self.path.display(), "saved chart");
        Ok(self.path.clone())
    }
}

fn render_error(e: impl std::fmt::Display) -> SinkError {
    RenderSnafu {
        what: "chart",
        message: e.to_string(),
    }
    .build()
}

/// Y-axis limits: half a percent of headroom around the traded range.
pub fn y_bounds(data: &BarSeries) -> (f64, f64) {
    let low = data.min_low().unwrap_or(0.0) * (1.0 - Y_PADDING);
    let high = data.max_high().unwrap_or(0.0) * (1.0 + Y_PADDING);
    if high > low { (low, high) } else { (low, low + 1.0) }
}

/// Day offsets that get an x-axis label: `0, step, 2*step, ...` up to `last`.
pub fn x_key_points(last: i64, step: u32) -> Vec<i64> {
    (0..=last.max(0)).step_by(step.max(1) as usize).collect()
}

pub fn latest_label(close: f64) -> String {
    format!("Latest: ${close:.2}")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::models::bar::PriceBar;

    fn series() -> BarSeries {
        let bars = (1..=20)
            .map(|d| {
                let ts = Utc.with_ymd_and_hms(2024, 2, d, 5, 0, 0).unwrap();
                let base = 100.0 + d as f64;
                PriceBar::new(ts, base, base + 2.0, base - 1.5, base + 0.5, 1_000_000.0)
            })
            .collect();
        BarSeries::new("AAPL", bars)
    }

    #[test]
    fn y_bounds_pad_the_traded_range() {
        let (lo, hi) = y_bounds(&series());
        assert!((lo - 99.5 * 0.995).abs() < 1e-9);
        assert!((hi - 122.0 * 1.005).abs() < 1e-9);
    }

    #[test]
    fn key_points_follow_label_interval() {
        assert_eq!(x_key_points(6, 1), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(x_key_points(29, 2).len(), 15);
        assert_eq!(x_key_points(10, 4), vec![0, 4, 8]);
        assert_eq!(x_key_points(0, 3), vec![0]);
    }

    #[test]
    fn title_and_annotation_text() {
        let sink = ChartSink::new("x.png", Lookback::new(30).unwrap(), (800, 600));
        assert_eq!(sink.title("TSLA"), "TSLA Stock Price - Last 30 Days");
        assert_eq!(latest_label(172.6), "Latest: $172.60");
    }

    #[tokio::test]
    async fn empty_series_draws_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.png");
        let sink = ChartSink::new(&path, Lookback::new(30).unwrap(), (800, 600));
        let err = sink.write(&BarSeries::new("AAPL", vec![])).await.unwrap_err();
        assert!(matches!(err, SinkError::EmptySeries { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn renders_png_or_reports_render_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.png");
        let sink = ChartSink::new(&path, Lookback::new(30).unwrap(), (800, 600));

        match sink.write(&series()).await {
            Ok(written) => {
                let bytes = std::fs::read(&written).unwrap();
                assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
            }
            // Hosts without any system font cannot draw text.
            Err(SinkError::Render { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
