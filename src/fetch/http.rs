//! Fetch resources from a remote site over HTTP

use super::{FetchResponse, Fetcher};
use crate::error::{Error, Result};

/// GETs resources relative to a base URL
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Full URL for a resource path
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Fetcher for HttpFetcher {
    async fn get(&self, path: &str) -> Result<FetchResponse> {
        let url = self.url_for(path);
        let fetch_error = |e: reqwest::Error| Error::Fetch {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(fetch_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(fetch_error)?;

        tracing::debug!("GET {} -> {}", url, status);
        Ok(FetchResponse::new(status, body))
    }
}
