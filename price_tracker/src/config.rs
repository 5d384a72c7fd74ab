//! Optional TOML configuration.
//!
//! Every key has a default, so an absent file and an empty file behave the
//! same. Command-line flags are applied on top in [`crate::cli`].
//!
//! ```toml
//! [api]
//! base_url = "https://api.polygon.io"
//! key_env = "POLYGON_API_KEY"
//!
//! [output]
//! report_path = "stock_data.txt"
//! chart_path = "stock_chart.png"
//!
//! [chart]
//! width = 1200
//! height = 800
//! show = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    io::{chart::DEFAULT_CHART_PATH, report::DEFAULT_REPORT_PATH},
    providers::polygon_rest::params::DEFAULT_BASE_URL,
};

pub const DEFAULT_KEY_ENV: &str = "POLYGON_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Scheme and host of the market-data API, without a trailing path.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key_env: DEFAULT_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: DEFAULT_REPORT_PATH.into(),
            chart_path: DEFAULT_CHART_PATH.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Open the saved chart in the platform image viewer.
    pub show: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            show: true,
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chart size must be non-zero, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        if self.api.key_env.trim().is_empty() {
            return Err(ConfigError::Invalid("api.key_env is empty".into()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }
        Ok(self)
    }
}

/// Parse and validate a config from a TOML string.
pub fn load_config_str(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(s)?;
    cfg.validate()
}

/// Parse and validate a config file.
pub fn load_config_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_str(&s)
}
