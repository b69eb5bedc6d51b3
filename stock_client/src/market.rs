//! Alpha Vantage client: latest quotes and daily time series.
use log::{debug, warn};
use serde_json::Value;
use stock_common::endpoints::{self, OutputSize};
use stock_common::quote::{self, DailySeries};
use stock_common::{Quote, Result};

use crate::transport::HttpSource;

/// Market-data client bound to one API key.
pub struct MarketClient<H> {
    http: H,
    base_url: String,
    api_key: String,
}

impl<H: HttpSource> MarketClient<H> {
    /// Create a client that sends requests for `api_key` to `base_url`.
    pub fn new(http: H, base_url: &str, api_key: &str) -> Self {
        MarketClient {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Latest quote for `symbol`.
    ///
    /// Unknown tickers come back as `StockError::QuoteNotFound`; transport and
    /// decode failures as `Http`/`Json` errors. Nothing here panics.
    pub fn quote(&self, symbol: &str) -> Result<Quote> {
        let url = endpoints::global_quote(&self.base_url, symbol, &self.api_key)?;
        let body = self.http.get_json(&url)?;
        log_refusal(symbol, &body);
        let quote = Quote::from_response(symbol, &body)?;
        debug!("Quote {}: price={} change={}", quote.symbol, quote.price, quote.change);
        Ok(quote)
    }

    /// Daily bars for `symbol` in provider order.
    pub fn daily_series(&self, symbol: &str, size: OutputSize) -> Result<DailySeries> {
        let url = endpoints::daily_series(&self.base_url, symbol, size, &self.api_key)?;
        let body = self.http.get_json(&url)?;
        log_refusal(symbol, &body);
        let series = quote::daily_series_from_response(symbol, &body)?;
        debug!("Daily series {}: {} bars", symbol, series.len());
        Ok(series)
    }
}

fn log_refusal(symbol: &str, body: &Value) {
    if let Some(message) = quote::provider_message(body) {
        warn!("Provider refused request for {}: {}", symbol, message);
    }
}
