use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    http::{StatusCode, Uri},
};
use chrono::NaiveDate;
use price_tracker::{
    config::Config,
    models::{
        date_range::{DateRange, Lookback},
        request_params::BarsRequestParams,
    },
    pipeline::{Settings, run},
    providers::{DataProvider, ProviderError, polygon_rest::PolygonProvider},
};
use secrecy::SecretString;
use tempfile::TempDir;

const OK_BODY: &str = r#"{
    "ticker": "AAPL",
    "queryCount": 2,
    "resultsCount": 2,
    "adjusted": true,
    "results": [
        {"v": 70790813.0, "o": 130.468, "c": 131.88, "h": 132.42, "l": 129.64, "t": 1673240400000, "n": 645365},
        {"v": 63896155, "o": 131.25, "c": 130.7349, "h": 131.63, "l": 128.72, "t": 1673326800000, "n": 554940}
    ],
    "status": "OK",
    "request_id": "6a7e466379af0a71039d60cc78e72282",
    "count": 2
}"#;

const EMPTY_BODY: &str =
    r#"{"ticker":"ZZZZ","queryCount":0,"resultsCount":0,"results":[],"status":"OK"}"#;

const FORBIDDEN_BODY: &str = r#"{"status":"NOT_AUTHORIZED","message":"You are not entitled to this data."}"#;

/// Serves `body` with `status` for every request and records the request URIs.
async fn stub_server(status: u16, body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let app = Router::new().fallback(move |uri: Uri| {
        let recorder = recorder.clone();
        async move {
            recorder.lock().unwrap().push(uri.to_string());
            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), seen)
}

fn provider(base_url: &str) -> PolygonProvider {
    PolygonProvider::with_base_url(SecretString::new("stub-key".into()), base_url).unwrap()
}

fn params(symbol: &str) -> BarsRequestParams {
    let end = NaiveDate::from_ymd_opt(2023, 1, 11).unwrap();
    BarsRequestParams::daily(symbol, DateRange::ending_on(end, Lookback::new(5).unwrap()))
}

#[tokio::test]
async fn ok_response_is_fetched_and_parsed() {
    let (base_url, seen) = stub_server(200, OK_BODY).await;

    let series = provider(&base_url).fetch_bars(params("aapl")).await.unwrap();
    assert_eq!(series.symbol, "AAPL");
    assert_eq!(series.bars.len(), 2);
    assert_eq!(series.bars[0].date_str(), "2023-01-09");
    assert_eq!(series.bars[0].open, 130.47);
    assert_eq!(series.bars[1].close, 130.73);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "exactly one request");
    let (path, query) = seen[0].split_once('?').expect("query string");
    assert_eq!(path, "/v2/aggs/ticker/AAPL/range/1/day/2023-01-06/2023-01-11");
    assert_eq!(query, "adjusted=true&sort=asc&apikey=stub-key");
}

#[tokio::test]
async fn forbidden_status_is_an_api_error() {
    let (base_url, _) = stub_server(403, FORBIDDEN_BODY).await;

    let err = provider(&base_url).fetch_bars(params("AAPL")).await.unwrap_err();
    match &err {
        ProviderError::Api { status, body, .. } => {
            assert_eq!(*status, 403);
            assert!(body.contains("NOT_AUTHORIZED"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("API Error: 403 - "));
}

#[tokio::test]
async fn empty_results_are_no_data() {
    let (base_url, _) = stub_server(200, EMPTY_BODY).await;

    let err = provider(&base_url).fetch_bars(params("ZZZZ")).await.unwrap_err();
    assert!(matches!(err, ProviderError::NoData { .. }));
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_key() {
    // Bind then drop, so the port refuses connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(&format!("http://{addr}"))
        .fetch_bars(params("AAPL"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Reqwest { .. }));
    assert!(!err.to_string().contains("stub-key"), "{err}");
}

#[tokio::test]
async fn full_run_against_stub_writes_the_report() {
    let (base_url, seen) = stub_server(200, OK_BODY).await;
    let dir = TempDir::new().unwrap();

    let mut config = Config::default();
    config.api.base_url = base_url;
    config.api.key_env = "PRICE_TRACKER_STUB_TEST_UNSET_KEY".into();
    config.output.report_path = dir.path().join("stock_data.txt");
    config.output.chart_path = dir.path().join("stock_chart.png");
    config.chart.show = false;
    let settings = Settings {
        config,
        ..Settings::default()
    };

    let mut output = Vec::new();
    let outcome = run(&settings, &mut Cursor::new("prompted-key\naapl\n5\n"), &mut output)
        .await
        .unwrap()
        .expect("run should succeed");

    assert_eq!(outcome.symbol, "AAPL");
    assert_eq!(outcome.bars, 2);
    let report = std::fs::read_to_string(outcome.report.expect("report written")).unwrap();
    assert!(report.lines().nth(6).unwrap().starts_with("2023-01-09   130.47"));

    assert!(seen.lock().unwrap()[0].ends_with("apikey=prompted-key"));
    let console = String::from_utf8(output).unwrap();
    assert!(console.starts_with("=== Stock Price Tracker ==="));
    assert!(console.contains("Successfully retrieved data for AAPL"));
}
