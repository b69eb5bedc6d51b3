//! News article payloads decoded from the NewsAPI `everything` endpoint.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StockError;
use crate::result::Result;

/// One news article. NewsAPI sends `null` for fields it could not fill, so all
/// of them are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the full article.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

/// Decode a NewsAPI response body, keeping at most `limit` articles
/// (`None` keeps all of them).
///
/// A body without an `articles` array is reported as [`StockError::Format`].
pub fn articles_from_response(body: Value, limit: Option<usize>) -> Result<Vec<Article>> {
    let response: NewsResponse = serde_json::from_value(body)?;
    let mut articles = response
        .articles
        .ok_or_else(|| StockError::Format("Uudiseid ei leitud".to_string()))?;
    if let Some(limit) = limit {
        articles.truncate(limit);
    }
    Ok(articles)
}
