//! Amazon search command implementation.

use crate::amazon::SearchParser;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::extract::Extractor;
use crate::fetch::{BrowserFetcher, PageSource};
use crate::format::Formatter;
use tracing::info;

/// Renders an Amazon search page and emits its result cards.
pub struct SearchCommand {
    config: Config,
    formatter: Formatter,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config, formatter: Formatter) -> Self {
        Self { config, formatter }
    }

    /// Executes the search in a headless browser and returns JSON output.
    pub async fn execute(&self, query: &str) -> Result<String, ScrapeError> {
        let browser = BrowserFetcher::new(&self.config, self.config.amazon_render_wait());
        self.execute_with_source(&browser, query).await
    }

    /// Executes the search with a provided page source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl PageSource,
        query: &str,
    ) -> Result<String, ScrapeError> {
        info!("Searching Amazon for: {}", query);

        let parser = SearchParser::new(self.config.amazon_origin.as_str());
        let html = source.fetch(&parser.search_url(query)).await?;
        let products = parser.extract(&html)?;

        info!("Found {} products", products.len());
        Ok(self.formatter.format_products(&products))
    }
}
