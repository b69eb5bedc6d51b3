//! Validated runtime configuration built from `Args`.
use stock_common::{Result, StockError};

use crate::args::Args;

/// Settings the clients are built from.
#[derive(Debug, Clone)]
pub struct Config {
    pub alpha_vantage_key: String,
    pub news_api_key: String,
    /// `None` means no limit.
    pub news_limit: Option<usize>,
    pub alpha_vantage_url: String,
    pub news_url: String,
}

impl Config {
    /// Trim and validate the parsed arguments.
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            alpha_vantage_key: required(args.alpha_vantage_key, "ALPHA_VANTAGE_API_KEY")?,
            news_api_key: required(args.news_api_key, "NEWS_API_KEY")?,
            news_limit: (args.news_limit > 0).then_some(args.news_limit),
            alpha_vantage_url: required(args.alpha_vantage_url, "--alpha-vantage-url")?,
            news_url: required(args.news_url, "--news-url")?,
        })
    }
}

fn required(value: String, name: &str) -> Result<String> {
    let value = value.trim().replace('"', "");
    if value.is_empty() {
        return Err(StockError::Config(format!("{name} must not be empty")));
    }
    Ok(value)
}
