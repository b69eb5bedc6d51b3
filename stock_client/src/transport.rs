//! Blocking HTTP transport used by the provider clients.
//!
//! `HttpSource` is the only place a request leaves the process. The real
//! implementation is `reqwest::blocking::Client`; tests plug in a canned one.
use log::{debug, error};
use reqwest::Url;
use serde_json::Value;
use stock_common::endpoints::redacted;
use stock_common::Result;

/// Something that can GET a URL and hand back the JSON body.
pub trait HttpSource {
    /// Issues one GET request and decodes the response body as JSON.
    ///
    /// The body is decoded whatever the status code is, providers put their
    /// error description in the JSON.
    fn get_json(&self, url: &Url) -> Result<Value>;
}

impl<T: HttpSource + ?Sized> HttpSource for &T {
    fn get_json(&self, url: &Url) -> Result<Value> {
        (**self).get_json(url)
    }
}

impl HttpSource for reqwest::blocking::Client {
    fn get_json(&self, url: &Url) -> Result<Value> {
        let shown = redacted(url);
        debug!("GET {}", shown);
        let response = self.get(url.clone()).send().map_err(|e| {
            error!("Request to {} failed: {}", shown, e);
            e
        })?;
        debug!("{} answered {}", shown, response.status());
        let body = response.json::<Value>().map_err(|e| {
            error!("Response from {} is not JSON: {}", shown, e);
            e
        })?;
        Ok(body)
    }
}

/// Builds the blocking client shared by both providers.
pub fn build_client() -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
