//! Company names, their tickers and the free-text symbol resolver.
//!
//! The table is a closed `strum` enum: parsing accepts the lower-case company
//! name in any case, iteration yields the companies in table order.
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Companies that can be looked up by name instead of by ticker.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, EnumIter, EnumString, AsRefStr, Hash, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Company {
    Apple,
    Microsoft,
    Tesla,
    Nvidia,
    Google,
    Amazon,
    Meta,
    Netflix,
    Intel,
    Amd,
    Samsung,
    Sony,
    Nike,
    #[strum(serialize = "coca-cola")]
    CocaCola,
    Mcdonalds,
    Visa,
    Mastercard,
    Paypal,
    Adobe,
    Salesforce,
}

impl Company {
    /// Market ticker the company trades under.
    pub fn ticker(self) -> &'static str {
        match self {
            Company::Apple => "AAPL",
            Company::Microsoft => "MSFT",
            Company::Tesla => "TSLA",
            Company::Nvidia => "NVDA",
            Company::Google => "GOOGL",
            Company::Amazon => "AMZN",
            Company::Meta => "META",
            Company::Netflix => "NFLX",
            Company::Intel => "INTC",
            Company::Amd => "AMD",
            Company::Samsung => "005930.KS",
            Company::Sony => "SONY",
            Company::Nike => "NKE",
            Company::CocaCola => "KO",
            Company::Mcdonalds => "MCD",
            Company::Visa => "V",
            Company::Mastercard => "MA",
            Company::Paypal => "PYPL",
            Company::Adobe => "ADBE",
            Company::Salesforce => "CRM",
        }
    }

    /// Table key, always lower case (e.g. `coca-cola`).
    pub fn key(&self) -> &str {
        self.as_ref()
    }

    /// Name for listings: first letter of every word upper-cased (`Coca-Cola`).
    pub fn display_name(&self) -> String {
        let mut out = String::with_capacity(self.key().len());
        let mut word_start = true;
        for c in self.key().chars() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            word_start = !c.is_alphabetic();
        }
        out
    }
}

/// All companies in table order.
pub fn companies() -> impl Iterator<Item = Company> {
    Company::iter()
}

/// Looks up a company name in the table. Matching ignores case and
/// surrounding whitespace.
pub fn lookup(name: &str) -> Option<&'static str> {
    name.trim()
        .to_lowercase()
        .parse::<Company>()
        .ok()
        .map(Company::ticker)
}

/// Maps free text to a ticker.
///
/// Known company names resolve through the table; anything else is taken
/// as a literal ticker and upper-cased. The result is not validated, an
/// unknown ticker only shows up later as a "not found" quote.
pub fn resolve(input: &str) -> String {
    match lookup(input) {
        Some(ticker) => ticker.to_string(),
        None => input.trim().to_uppercase(),
    }
}
