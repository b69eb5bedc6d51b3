//! NewsAPI client.
use log::{debug, warn};
use stock_common::endpoints;
use stock_common::news::{self, Article};
use stock_common::Result;

use crate::transport::HttpSource;

/// News search client bound to one API key.
pub struct NewsClient<H> {
    http: H,
    base_url: String,
    api_key: String,
    /// Maximum number of articles returned; `None` returns all.
    limit: Option<usize>,
}

impl<H: HttpSource> NewsClient<H> {
    /// Create a client returning at most `limit` articles per search.
    pub fn new(http: H, base_url: &str, api_key: &str, limit: Option<usize>) -> Self {
        NewsClient {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            limit,
        }
    }

    /// Articles mentioning `query`. Any failure yields an empty list.
    pub fn articles(&self, query: &str) -> Vec<Article> {
        match self.search(query) {
            Ok(articles) => {
                debug!("News for {}: {} articles", query, articles.len());
                articles
            }
            Err(e) => {
                warn!("News lookup for {} failed: {}", query, e);
                Vec::new()
            }
        }
    }

    fn search(&self, query: &str) -> Result<Vec<Article>> {
        let url = endpoints::news_search(&self.base_url, query, &self.api_key)?;
        let body = self.http.get_json(&url)?;
        news::articles_from_response(body, self.limit)
    }
}
