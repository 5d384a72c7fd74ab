use secrecy::{ExposeSecret, SecretString};
use snafu::ensure;

use crate::{
    models::{bar::DATE_FORMAT, request_params::BarsRequestParams},
    providers::{ProviderError, ValidationSnafu},
};

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Bars are always requested oldest first.
const SORT_ASCENDING: &str = "asc";

/// Builds the daily aggregates URL for `params`, without the query string.
pub fn aggregates_url(base_url: &str, params: &BarsRequestParams) -> String {
    format!(
        "{}/v2/aggs/ticker/{}/range/1/day/{}/{}",
        base_url.trim_end_matches('/'),
        params.symbol,
        params.range.start.format(DATE_FORMAT),
        params.range.end.format(DATE_FORMAT),
    )
}

/// Query string for an aggregates request. The key is the last pair.
pub fn construct_params(
    params: &BarsRequestParams,
    api_key: &SecretString,
) -> Vec<(String, String)> {
    vec![
        ("adjusted".to_string(), params.adjusted.to_string()),
        ("sort".to_string(), SORT_ASCENDING.to_string()),
        ("apikey".to_string(), api_key.expose_secret().to_string()),
    ]
}

/// Rejects symbols that would break out of the URL path segment.
///
/// Polygon tickers are alphanumeric with `.` share classes (`BRK.B`) and
/// `:` market prefixes (`X:BTCUSD`).
pub fn validate_params(params: &BarsRequestParams) -> Result<(), ProviderError> {
    ensure!(
        !params.symbol.is_empty(),
        ValidationSnafu {
            message: "ticker symbol is empty"
        }
    );
    ensure!(
        params
            .symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-')),
        ValidationSnafu {
            message: format!("unsupported characters in ticker {:?}", params.symbol)
        }
    );
    ensure!(
        params.range.start <= params.range.end,
        ValidationSnafu {
            message: format!(
                "start date {} is after end date {}",
                params.range.start, params.range.end
            )
        }
    );
    Ok(())
}
