//! Direct fetch using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch::PageSource;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Single-shot HTTP GET with a fixed user-agent and timeout. No retries.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from the given configuration.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let timeout = config.http_timeout();

        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::fetch("Failed to create HTTP client", e))?;

        Ok(Self { client, user_agent: config.user_agent.clone(), timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        info!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "ja-JP,ja;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| ScrapeError::fetch("Network request failed", e))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::Fetch(format!(
                "Network request failed: status {} for {}",
                status, url
            )));
        }

        response.text().await.map_err(|e| ScrapeError::fetch("Failed to read response body", e))
    }
}
