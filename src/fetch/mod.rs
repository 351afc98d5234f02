//! Page acquisition: direct HTTP or a rendered headless-browser fetch.

pub mod browser;
pub mod http;

use crate::error::ScrapeError;
use async_trait::async_trait;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// Something that turns a URL into a document body - enables mocking for tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Retrieves the document at `url` and returns its markup.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}
