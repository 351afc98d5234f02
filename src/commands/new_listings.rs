//! Mercari new listings command implementation.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::extract::Extractor;
use crate::fetch::{BrowserFetcher, PageSource};
use crate::format::Formatter;
use crate::mercari::NewListingsParser;
use tracing::info;

/// Renders the Mercari homepage and emits its embedded item list.
pub struct NewListingsCommand {
    config: Config,
    formatter: Formatter,
}

impl NewListingsCommand {
    /// Creates a new listings command.
    pub fn new(config: Config, formatter: Formatter) -> Self {
        Self { config, formatter }
    }

    /// Renders the homepage in a headless browser and returns JSON output.
    pub async fn execute(&self) -> Result<String, ScrapeError> {
        let browser = BrowserFetcher::new(&self.config, self.config.mercari_render_wait());
        self.execute_with_source(&browser).await
    }

    /// Executes with a provided page source (for testing).
    pub async fn execute_with_source(&self, source: &impl PageSource) -> Result<String, ScrapeError> {
        let url = format!("{}/", self.config.mercari_origin.trim_end_matches('/'));
        info!("Fetching Mercari new listings from {}", url);

        let html = source.fetch(&url).await?;
        let products = NewListingsParser::new(self.config.mercari_origin.as_str()).extract(&html)?;

        info!("Found {} new listings", products.len());
        Ok(self.formatter.format_products(&products))
    }
}
