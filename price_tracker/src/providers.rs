//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the interface the pipeline
//! uses to fetch daily bars for one ticker. [`polygon_rest`] is the only
//! implementation; tests substitute their own.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use price_tracker::models::{bar_series::BarSeries, request_params::BarsRequestParams};
//! use price_tracker::providers::{DataProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries::new(params.symbol, vec![]))
//!     }
//! }
//! ```

pub mod polygon_rest;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};

/// Trait for fetching daily bar data from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the daily bars described by `params`.
    ///
    /// # Returns
    ///
    /// * `Ok(BarSeries)` - The bars in the order the provider returned them.
    /// * `Err(ProviderError)` - The request failed or produced no bars.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<BarSeries, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// No key was supplied.
    #[snafu(display("API key is empty"))]
    EmptyApiKey { backtrace: Backtrace },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success HTTP status.
    #[snafu(display("API Error: {status} - {body}"))]
    Api {
        status: u16,
        body: String,
        backtrace: Backtrace,
    },

    /// The provider answered successfully but returned no bars.
    #[snafu(display("No data found in API response for {symbol}"))]
    NoData {
        symbol: String,
        backtrace: Backtrace,
    },

    /// The response body did not have the expected shape.
    #[snafu(display("Failed to decode API response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
