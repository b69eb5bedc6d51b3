//!
//! Common types and utilities shared by the stock lookup client.
//!
//! This crate aggregates:
//! - `error` — unified error type `StockError` used across the workspace.
//! - `result` — handy `Result<T, StockError>` alias.
//! - `symbols` — company name to ticker table and the symbol resolver.
//! - `quote` — quote, daily time-series and comparison payloads.
//! - `news` — news article payloads.
//! - `endpoints` — provider base URLs and request URL builders.
#![warn(missing_docs)]
pub mod endpoints;
pub mod error;
pub mod news;
pub mod quote;
pub mod result;
pub mod symbols;

pub use error::StockError;
pub use quote::Quote;
pub use result::Result;
