//! Provider base URLs and request URL builders.
//!
//! Query values are percent-encoded by `reqwest::Url`, so free-text input
//! such as `coca cola` or `BRK.B` is safe to pass through.
use reqwest::Url;

use crate::error::StockError;
use crate::result::Result;

/// Alpha Vantage query endpoint.
pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
/// NewsAPI full-text search endpoint.
pub const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Size of a daily time-series response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    /// Latest 100 trading days.
    Compact,
    /// Full history.
    Full,
}

impl OutputSize {
    fn as_param(self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// `GLOBAL_QUOTE` request URL.
pub fn global_quote(base: &str, symbol: &str, api_key: &str) -> Result<Url> {
    build(
        base,
        &[
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol),
            ("apikey", api_key),
        ],
    )
}

/// `TIME_SERIES_DAILY` request URL.
pub fn daily_series(base: &str, symbol: &str, size: OutputSize, api_key: &str) -> Result<Url> {
    build(
        base,
        &[
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", size.as_param()),
            ("apikey", api_key),
        ],
    )
}

/// NewsAPI `everything` search URL.
pub fn news_search(base: &str, query: &str, api_key: &str) -> Result<Url> {
    build(base, &[("q", query), ("apiKey", api_key)])
}

/// Copy of `url` with the API key parameters masked, for logging.
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k.eq_ignore_ascii_case("apikey") {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

fn build(base: &str, params: &[(&str, &str)]) -> Result<Url> {
    Url::parse_with_params(base, params)
        .map_err(|e| StockError::Config(format!("invalid endpoint URL {base}: {e}")))
}
