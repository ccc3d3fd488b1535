//! Fetching static resources: the post index and Markdown documents
//!
//! A [`Fetcher`] answers a GET for a path relative to the site root with a
//! status code and a text body. Transport problems are errors; HTTP-level
//! failures are ordinary responses and are judged by the caller.

mod http;
mod site;

pub use http::HttpFetcher;
pub use site::SiteFetcher;

use crate::error::Result;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not found")
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests for site resources
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn get(&self, path: &str) -> Result<FetchResponse>;
}

/// Either a local site directory or a remote site
pub enum AnyFetcher {
    Site(SiteFetcher),
    Http(HttpFetcher),
}

impl Fetcher for AnyFetcher {
    async fn get(&self, path: &str) -> Result<FetchResponse> {
        match self {
            AnyFetcher::Site(fetcher) => fetcher.get(path).await,
            AnyFetcher::Http(fetcher) => fetcher.get(path).await,
        }
    }
}
