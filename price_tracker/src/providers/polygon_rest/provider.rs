use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use snafu::{OptionExt, ResultExt, ensure};
use tracing::{debug, info};

use crate::{
    models::{bar::PriceBar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, EmptyApiKeySnafu, InternalSnafu,
        NoDataSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        polygon_rest::{
            params::{DEFAULT_BASE_URL, aggregates_url, construct_params, validate_params},
            response::PolygonResponse,
        },
    },
};

pub struct PolygonProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl PolygonProvider {
    /// Creates a provider against the public Polygon.io endpoint.
    pub fn new(api_key: SecretString) -> Result<Self, ProviderInitError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a provider against `base_url`, e.g. a proxy or a local stub.
    pub fn with_base_url(
        api_key: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderInitError> {
        ensure!(!api_key.expose_secret().trim().is_empty(), EmptyApiKeySnafu);

        let client = Client::builder()
            .user_agent(concat!("price_tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl DataProvider for PolygonProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
        validate_params(&params)?;

        let url = aggregates_url(&self.base_url, &params);
        debug!(%url, "requesting daily aggregates");

        // reqwest errors carry the full URL, query string included; strip it so
        // the key never reaches the logs.
        let response = self
            .client
            .get(&url)
            .query(&construct_params(&params, &self.api_key))
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)?;

        let series = parse_response(&params.symbol, status, &body)?;
        info!(symbol = %series.symbol, bars = series.bars.len(), "fetched daily bars");
        Ok(series)
    }
}

/// Turns a raw aggregates response into a [`BarSeries`].
///
/// Non-200 statuses become [`ProviderError::Api`] carrying the body text, and a
/// missing or empty `results` array becomes [`ProviderError::NoData`]. Bars keep
/// the order the API returned them in.
pub fn parse_response(
    symbol: &str,
    status: StatusCode,
    body: &str,
) -> Result<BarSeries, ProviderError> {
    if status != StatusCode::OK {
        return ApiSnafu {
            status: status.as_u16(),
            body: body.trim(),
        }
        .fail();
    }

    let response: PolygonResponse = serde_json::from_str(body).context(DecodeSnafu)?;
    let results = response
        .results
        .filter(|r| !r.is_empty())
        .context(NoDataSnafu { symbol })?;

    let bars = results
        .into_iter()
        .map(|pb| -> Result<PriceBar, ProviderError> {
            let timestamp = DateTime::from_timestamp_millis(pb.timestamp_ms).context(
                InternalSnafu {
                    message: format!("bar timestamp {} is out of range", pb.timestamp_ms),
                },
            )?;
            Ok(PriceBar::new(
                timestamp, pb.open, pb.high, pb.low, pb.close, pb.volume,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BarSeries::new(response.ticker.unwrap_or_else(|| symbol.to_string()), bars))
}
