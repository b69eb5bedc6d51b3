//! Error types shared across the workspace.
//!
//! `StockError` covers both kinds of failure the tool knows about: data the
//! provider did not return (unknown ticker, missing series, too few points)
//! and unexpected failures at the network boundary (transport, JSON). The
//! shell prints either kind as `Viga: <message>`, so the messages of the
//! expected-absent variants are user-facing.
use std::io;

use thiserror::Error;

/// Unified error type for lookups and derived metrics.
#[derive(Error, Debug)]
pub enum StockError {
    /// Transport failure or non-decodable body reported by `reqwest`.
    #[error("Viga andmete pärimisel: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure while decoding a provider payload via serde_json.
    #[error("Vigane JSON vastus: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading prompts or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The quote endpoint answered without quote data for the symbol.
    #[error("Aktsia andmeid ei leitud")]
    QuoteNotFound(String),

    /// The time-series endpoint answered without daily data for the symbol.
    #[error("Ajaloolisi andmeid ei leitud")]
    SeriesNotFound(String),

    /// Not enough data points for the requested moving-average period.
    #[error("Viga liikuva keskmise arvutamisel: {available} andmepunkti, periood {period}")]
    InsufficientData {
        /// Number of closing prices the provider returned.
        available: usize,
        /// Requested window length.
        period: usize,
    },

    /// A provider string could not be converted to a number.
    #[error("Ei saa arvuks teisendada: {0}")]
    Parse(String),

    /// One side of a two-symbol comparison failed.
    #[error("Viga aktsiate võrdlemisel: {0}")]
    Comparison(String),

    /// Missing or invalid start-up configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic validation error with a human-readable message.
    #[error("{0}")]
    Format(String),
}
