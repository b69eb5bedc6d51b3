//! Stock Client — an interactive console tool that looks up stock quotes and
//! news. Company names are resolved to tickers through a fixed table, quotes
//! and daily series come from Alpha Vantage, news from NewsAPI. On top of the
//! raw lookups it computes a moving average, a date-range history, a
//! two-ticker comparison and a portfolio valuation.
//!
//! Usage example (CLI):
//! ```bash
//! ALPHA_VANTAGE_API_KEY=... NEWS_API_KEY=... stock_client --news-limit 5
//! ```
//!
//! Keys may also be placed in a `.env` file in the working directory.
#![warn(missing_docs)]
mod args;
mod config;
mod market;
mod metrics;
mod news;
mod shell;
mod transport;

use crate::args::Args;
use crate::config::Config;
use crate::market::MarketClient;
use crate::news::NewsClient;
use crate::shell::Shell;
use clap::Parser;
use log::{error, info};
use stock_common::Result;
use std::io;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logger();
    let args = Args::parse();
    let config = Config::from_args(args).map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!(
        "Using market data at {} and news at {}",
        config.alpha_vantage_url, config.news_url
    );

    let http = transport::build_client()?;
    let market = MarketClient::new(http.clone(), &config.alpha_vantage_url, &config.alpha_vantage_key);
    let news = NewsClient::new(http, &config.news_url, &config.news_api_key, config.news_limit);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock(), market, news).run()
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
