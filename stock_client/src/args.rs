//! Command-line arguments for the stock lookup client.
//!
//! This module defines the CLI interface using `clap`. API keys fall back to
//! environment variables, which may also come from a local `.env` file.
use clap::Parser;
use stock_common::endpoints::{ALPHA_VANTAGE_URL, NEWS_API_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Alpha Vantage API key used for quotes and time series.
    #[clap(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub alpha_vantage_key: String,

    /// NewsAPI key used for news search.
    #[clap(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: String,

    /// Maximum number of news articles to show, 0 shows all of them.
    #[clap(long, default_value_t = 5)]
    pub news_limit: usize,

    /// Alpha Vantage query endpoint.
    #[clap(long, default_value = ALPHA_VANTAGE_URL)]
    pub alpha_vantage_url: String,

    /// NewsAPI search endpoint.
    #[clap(long, default_value = NEWS_API_URL)]
    pub news_url: String,
}
