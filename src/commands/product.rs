//! Mercari item page command implementation.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch::{HttpFetcher, PageSource};
use crate::format::Formatter;
use crate::mercari::ProductPageParser;
use tracing::info;

/// Fetches one Mercari item page over plain HTTP.
pub struct ProductCommand {
    config: Config,
    formatter: Formatter,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config, formatter: Formatter) -> Self {
        Self { config, formatter }
    }

    /// Fetches the item page and returns a single JSON object.
    pub async fn execute(&self, url: &str) -> Result<String, ScrapeError> {
        let client = HttpFetcher::new(&self.config)?;
        self.execute_with_source(&client, url).await
    }

    /// Fetches the item page with a provided page source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl PageSource,
        url: &str,
    ) -> Result<String, ScrapeError> {
        info!("Looking up Mercari item: {}", url);

        let html = source.fetch(url).await?;
        let product = ProductPageParser::new(url).parse_product_page(&html);

        Ok(self.formatter.format_product(&product))
    }
}
