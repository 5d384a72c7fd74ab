use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct PolygonBar {
    /// Start of the aggregate window, epoch milliseconds.
    #[serde(rename = "t")]
    pub timestamp_ms: i64,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

#[derive(Deserialize, Debug)]
pub struct PolygonResponse {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<PolygonBar>>,
}
