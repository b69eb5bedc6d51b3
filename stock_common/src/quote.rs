//! Market data payloads decoded from the Alpha Vantage JSON responses.
//!
//! Provider values are kept as the strings the provider sent. Conversion to
//! `f64` happens only where arithmetic needs it, see [`Quote::price_value`]
//! and [`DailyBar::close_value`].
use serde_json::{Map, Value};

use crate::error::StockError;
use crate::result::Result;

/// Top-level key of a `GLOBAL_QUOTE` response.
pub const GLOBAL_QUOTE_KEY: &str = "Global Quote";
/// Top-level key of a `TIME_SERIES_DAILY` response.
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
/// Placeholder for fields the provider left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Keys the provider uses instead of data when it refuses a request
/// (bad key, throttling, premium endpoint).
const PROVIDER_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Latest quote for a single ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker the quote was requested for.
    pub symbol: String,
    /// Last traded price, e.g. `189.8400`.
    pub price: String,
    /// Absolute change against the previous close.
    pub change: String,
    /// Relative change, e.g. `-0.5213%`.
    pub change_percent: String,
}

impl Quote {
    /// Decode a `GLOBAL_QUOTE` response body for `symbol`.
    ///
    /// A missing or empty `Global Quote` object means the provider has no data
    /// for the ticker and yields [`StockError::QuoteNotFound`]. Missing fields
    /// inside a present object default to `N/A`.
    pub fn from_response(symbol: &str, body: &Value) -> Result<Quote> {
        let quote = body
            .get(GLOBAL_QUOTE_KEY)
            .and_then(Value::as_object)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| StockError::QuoteNotFound(symbol.to_string()))?;

        Ok(Quote {
            symbol: symbol.to_string(),
            price: field(quote, "05. price"),
            change: field(quote, "09. change"),
            change_percent: field(quote, "10. change percent"),
        })
    }

    /// Price as a number.
    pub fn price_value(&self) -> Result<f64> {
        parse_number(&self.price)
    }
}

/// One trading day of a daily time series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    /// Opening price.
    pub open: String,
    /// Day high.
    pub high: String,
    /// Day low.
    pub low: String,
    /// Closing price.
    pub close: String,
    /// Traded volume.
    pub volume: String,
}

impl DailyBar {
    fn from_object(bar: &Map<String, Value>) -> DailyBar {
        DailyBar {
            open: field(bar, "1. open"),
            high: field(bar, "2. high"),
            low: field(bar, "3. low"),
            close: field(bar, "4. close"),
            volume: field(bar, "5. volume"),
        }
    }

    /// Closing price as a number.
    pub fn close_value(&self) -> Result<f64> {
        parse_number(&self.close)
    }
}

/// Daily bars keyed by `YYYY-MM-DD`, in the order the provider listed them.
pub type DailySeries = Vec<(String, DailyBar)>;

/// Decode a `TIME_SERIES_DAILY` response body.
///
/// Entry order is the provider's key order, which is newest first for
/// Alpha Vantage but is not re-sorted here.
pub fn daily_series_from_response(symbol: &str, body: &Value) -> Result<DailySeries> {
    let series = body
        .get(DAILY_SERIES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| StockError::SeriesNotFound(symbol.to_string()))?;

    Ok(series
        .iter()
        .filter_map(|(date, bar)| {
            bar.as_object()
                .map(|bar| (date.clone(), DailyBar::from_object(bar)))
        })
        .collect())
}

/// Returns the refusal message if the provider answered with one instead of data.
pub fn provider_message(body: &Value) -> Option<&str> {
    PROVIDER_MESSAGE_KEYS
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
}

/// Prices of two tickers side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// First ticker.
    pub symbol1: String,
    /// Price of the first ticker.
    pub price1: String,
    /// Second ticker.
    pub symbol2: String,
    /// Price of the second ticker.
    pub price2: String,
}

impl Comparison {
    /// Pair up two successfully fetched quotes.
    pub fn new(first: Quote, second: Quote) -> Self {
        Comparison {
            symbol1: first.symbol,
            price1: first.price,
            symbol2: second.symbol,
            price2: second.price,
        }
    }
}

fn field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| StockError::Parse(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_fields_are_taken_verbatim() {
        let body = json!({
            "Global Quote": {
                "01. symbol": "IBM",
                "05. price": "172.5000",
                "09. change": "-1.2500",
                "10. change percent": "-0.7194%"
            }
        });
        let quote = Quote::from_response("IBM", &body).unwrap();
        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.price, "172.5000");
        assert_eq!(quote.change, "-1.2500");
        assert_eq!(quote.change_percent, "-0.7194%");
        assert_eq!(quote.price_value().unwrap(), 172.5);
    }

    #[test]
    fn missing_quote_fields_default_to_na() {
        let body = json!({ "Global Quote": { "05. price": "10.00" } });
        let quote = Quote::from_response("X", &body).unwrap();
        assert_eq!(quote.change, NOT_AVAILABLE);
        assert_eq!(quote.change_percent, NOT_AVAILABLE);
    }

    #[test]
    fn absent_or_empty_global_quote_is_not_found() {
        let missing = Quote::from_response("X", &json!({ "foo": 1 }));
        assert!(matches!(missing, Err(StockError::QuoteNotFound(s)) if s == "X"));

        let empty = Quote::from_response("X", &json!({ "Global Quote": {} }));
        assert!(matches!(empty, Err(StockError::QuoteNotFound(_))));
    }

    #[test]
    fn na_price_does_not_parse() {
        let quote = Quote {
            symbol: "X".into(),
            price: NOT_AVAILABLE.into(),
            change: NOT_AVAILABLE.into(),
            change_percent: NOT_AVAILABLE.into(),
        };
        assert!(matches!(quote.price_value(), Err(StockError::Parse(_))));
    }

    #[test]
    fn daily_series_keeps_provider_order() {
        let body = json!({
            "Meta Data": {},
            "Time Series (Daily)": {
                "2024-03-05": { "4. close": "3.0" },
                "2024-03-01": { "4. close": "1.0" },
                "2024-03-04": { "4. close": "2.0" }
            }
        });
        let series = daily_series_from_response("X", &body).unwrap();
        let dates: Vec<&str> = series.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(dates, ["2024-03-05", "2024-03-01", "2024-03-04"]);
        assert_eq!(series[0].1.close_value().unwrap(), 3.0);
        assert_eq!(series[0].1.open, NOT_AVAILABLE);
    }

    #[test]
    fn missing_daily_series_is_an_error() {
        let result = daily_series_from_response("X", &json!({}));
        assert!(matches!(result, Err(StockError::SeriesNotFound(_))));
    }

    #[test]
    fn provider_refusals_are_detected() {
        let body = json!({ "Note": "Thank you for using Alpha Vantage!" });
        assert_eq!(
            provider_message(&body),
            Some("Thank you for using Alpha Vantage!")
        );
        assert_eq!(provider_message(&json!({ "Global Quote": {} })), None);
    }
}
