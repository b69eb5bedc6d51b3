//! Derived metrics computed from repeated market-data lookups.
//!
//! - `moving_average` — mean of the first N closes in provider order.
//! - `historical_range` / `filter_range` — daily bars between two ISO dates.
//! - `portfolio_value` — sum of quantity × latest price, skipping failed tickers.
//! - `compare` — two quotes side by side; fails if either lookup fails.
use std::collections::BTreeMap;

use log::{debug, warn};
use stock_common::endpoints::OutputSize;
use stock_common::quote::{Comparison, DailyBar, DailySeries};
use stock_common::{Result, StockError};

use crate::market::MarketClient;
use crate::transport::HttpSource;

/// Default moving-average window in days.
pub const DEFAULT_PERIOD: usize = 50;

/// Tickers and share counts in entry order, held only for one valuation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    holdings: Vec<(String, i64)>,
}

impl Portfolio {
    /// Empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity for `symbol`. A ticker entered again keeps its
    /// original position and takes the new quantity.
    pub fn set(&mut self, symbol: String, quantity: i64) {
        match self.holdings.iter().position(|(s, _)| *s == symbol) {
            Some(index) => self.holdings[index].1 = quantity,
            None => self.holdings.push((symbol, quantity)),
        }
    }

    /// Number of distinct tickers.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// True when nothing was entered.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Holdings in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.holdings.iter().map(|(s, q)| (s.as_str(), *q))
    }
}

/// Result of a portfolio valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Sum of quantity × price over the tickers that could be priced.
    pub total: f64,
    /// Tickers left out because their quote failed.
    pub skipped: Vec<String>,
}

/// Average of the first `period` closing prices the provider returned.
///
/// The window is whatever comes first in the response, not a window aligned
/// to calendar dates. Fewer closes than `period` (or a zero period) is an
/// `InsufficientData` error.
pub fn moving_average<H: HttpSource>(
    client: &MarketClient<H>,
    symbol: &str,
    period: usize,
) -> Result<f64> {
    let series = client.daily_series(symbol, OutputSize::Compact)?;
    average_of_first(&series, period)
}

fn average_of_first(series: &DailySeries, period: usize) -> Result<f64> {
    if period == 0 || series.len() < period {
        return Err(StockError::InsufficientData {
            available: series.len(),
            period,
        });
    }
    let closes = series
        .iter()
        .take(period)
        .map(|(_, bar)| bar.close_value())
        .collect::<Result<Vec<f64>>>()?;
    Ok(closes.iter().sum::<f64>() / period as f64)
}

/// Full daily history of `symbol` restricted to `start..=end`.
pub fn historical_range<H: HttpSource>(
    client: &MarketClient<H>,
    symbol: &str,
    start: &str,
    end: &str,
) -> Result<BTreeMap<String, DailyBar>> {
    let series = client.daily_series(symbol, OutputSize::Full)?;
    Ok(filter_range(series, start, end))
}

/// Keeps bars whose date key satisfies `start <= date <= end`.
///
/// Dates are compared as strings, which orders correctly for `YYYY-MM-DD`.
/// An inverted range gives an empty map.
pub fn filter_range(series: DailySeries, start: &str, end: &str) -> BTreeMap<String, DailyBar> {
    series
        .into_iter()
        .filter(|(date, _)| start <= date.as_str() && date.as_str() <= end)
        .collect()
}

/// Values `portfolio` at the latest prices.
///
/// A ticker whose quote cannot be fetched or whose price is not a number is
/// logged, listed in `Valuation::skipped` and left out of the total.
pub fn portfolio_value<H: HttpSource>(client: &MarketClient<H>, portfolio: &Portfolio) -> Valuation {
    let mut valuation = Valuation {
        total: 0.0,
        skipped: Vec::new(),
    };
    for (symbol, quantity) in portfolio.iter() {
        match client.quote(symbol).and_then(|q| q.price_value()) {
            Ok(price) => valuation.total += price * quantity as f64,
            Err(e) => {
                warn!("Skipping {} in portfolio: {}", symbol, e);
                valuation.skipped.push(symbol.to_string());
            }
        }
    }
    debug!(
        "Portfolio of {} tickers valued at {:.2} ({} skipped)",
        portfolio.len(),
        valuation.total,
        valuation.skipped.len()
    );
    valuation
}

/// Latest prices of two tickers.
pub fn compare<H: HttpSource>(client: &MarketClient<H>, first: &str, second: &str) -> Result<Comparison> {
    let a = client.quote(first);
    let b = client.quote(second);
    match (a, b) {
        (Ok(a), Ok(b)) => Ok(Comparison::new(a, b)),
        (Err(e), _) => Err(StockError::Comparison(format!("{first}: {e}"))),
        (_, Err(e)) => Err(StockError::Comparison(format!("{second}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeHttp;
    use serde_json::{json, Map, Value};
    use stock_common::endpoints::ALPHA_VANTAGE_URL;

    fn quote(price: &str) -> Value {
        json!({ "Global Quote": { "05. price": price, "09. change": "0", "10. change percent": "0%" } })
    }

    fn daily(closes: &[(&str, &str)]) -> Value {
        let mut series = Map::new();
        for (date, close) in closes {
            series.insert(date.to_string(), json!({ "4. close": close }));
        }
        json!({ "Time Series (Daily)": series })
    }

    fn bars(dates: &[&str]) -> DailySeries {
        dates
            .iter()
            .map(|d| {
                (
                    d.to_string(),
                    DailyBar {
                        open: "1".into(),
                        high: "1".into(),
                        low: "1".into(),
                        close: "1".into(),
                        volume: "1".into(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn moving_average_uses_first_entries_in_provider_order() {
        let http = FakeHttp::new().route(
            "function=TIME_SERIES_DAILY&symbol=A&outputsize=compact",
            daily(&[("2024-01-05", "10"), ("2024-01-04", "20"), ("2024-01-03", "90")]),
        );
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        assert_eq!(moving_average(&client, "A", 2).unwrap(), 15.0);
        assert_eq!(moving_average(&client, "A", 3).unwrap(), 40.0);
    }

    #[test]
    fn moving_average_needs_enough_points() {
        let http = FakeHttp::new().route("symbol=A", daily(&[("2024-01-05", "10")]));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        assert!(matches!(
            moving_average(&client, "A", 50),
            Err(StockError::InsufficientData { available: 1, period: 50 })
        ));
        assert!(moving_average(&client, "A", 0).is_err());
    }

    #[test]
    fn moving_average_rejects_non_numeric_close() {
        let http = FakeHttp::new().route("symbol=A", daily(&[("2024-01-05", "n/a")]));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        assert!(matches!(moving_average(&client, "A", 1), Err(StockError::Parse(_))));
    }

    #[test]
    fn filter_range_is_inclusive_and_sorted() {
        let series = bars(&["2024-03-05", "2024-02-28", "2024-03-01", "2024-03-10"]);
        let kept = filter_range(series, "2024-03-01", "2024-03-05");
        let dates: Vec<&str> = kept.keys().map(String::as_str).collect();
        assert_eq!(dates, ["2024-03-01", "2024-03-05"]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let series = bars(&["2024-03-05", "2024-03-01"]);
        assert!(filter_range(series, "2024-03-05", "2024-03-01").is_empty());
    }

    #[test]
    fn historical_range_requests_full_history() {
        let http = FakeHttp::new().route(
            "symbol=A&outputsize=full",
            daily(&[("2024-01-05", "10"), ("2023-12-29", "9")]),
        );
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        let range = historical_range(&client, "A", "2024-01-01", "2024-01-31").unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range["2024-01-05"].close, "10");
    }

    #[test]
    fn portfolio_skips_failing_ticker() {
        let http = FakeHttp::new()
            .route("function=GLOBAL_QUOTE&symbol=A", quote("10"))
            .route("function=GLOBAL_QUOTE&symbol=B", json!({ "Error Message": "Invalid API call" }));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        let mut portfolio = Portfolio::new();
        portfolio.set("A".to_string(), 2);
        portfolio.set("B".to_string(), 3);
        let valuation = portfolio_value(&client, &portfolio);
        assert_eq!(valuation.total, 20.0);
        assert_eq!(valuation.skipped, ["B"]);
    }

    #[test]
    fn portfolio_skips_unpriced_ticker() {
        let http = FakeHttp::new()
            .route("symbol=A", quote("2.5"))
            .route("symbol=C", json!({ "Global Quote": { "01. symbol": "C" } }));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        let mut portfolio = Portfolio::new();
        portfolio.set("A".to_string(), 4);
        portfolio.set("C".to_string(), 1);
        let valuation = portfolio_value(&client, &portfolio);
        assert_eq!(valuation.total, 10.0);
        assert_eq!(valuation.skipped, ["C"]);
    }

    #[test]
    fn portfolio_keeps_entry_order_and_signed_quantities() {
        let http = FakeHttp::new()
            .route("symbol=A", quote("10"))
            .route("symbol=Z", json!({}))
            .route("symbol=M", json!({}));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        let mut portfolio = Portfolio::new();
        portfolio.set("Z".to_string(), 1);
        portfolio.set("A".to_string(), 5);
        portfolio.set("M".to_string(), 1);
        portfolio.set("A".to_string(), -2);
        assert_eq!(portfolio.len(), 3);
        let order: Vec<&str> = portfolio.iter().map(|(s, _)| s).collect();
        assert_eq!(order, ["Z", "A", "M"]);

        let valuation = portfolio_value(&client, &portfolio);
        assert_eq!(valuation.total, -20.0);
        assert_eq!(valuation.skipped, ["Z", "M"]);
    }

    #[test]
    fn compare_reports_both_prices() {
        let http = FakeHttp::new()
            .route("symbol=A", quote("10"))
            .route("symbol=B", quote("12.5"));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        let cmp = compare(&client, "A", "B").unwrap();
        assert_eq!((cmp.symbol1.as_str(), cmp.price1.as_str()), ("A", "10"));
        assert_eq!((cmp.symbol2.as_str(), cmp.price2.as_str()), ("B", "12.5"));
    }

    #[test]
    fn compare_fails_when_either_side_fails() {
        let http = FakeHttp::new().route("symbol=A", quote("10"));
        let client = MarketClient::new(&http, ALPHA_VANTAGE_URL, "k");
        assert!(matches!(compare(&client, "A", "B"), Err(StockError::Comparison(_))));
        assert!(matches!(compare(&client, "B", "A"), Err(StockError::Comparison(_))));
    }
}
