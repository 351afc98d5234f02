//! Rendered fetch through a headless Chromium instance.
//!
//! The browser is launched per fetch and always torn down before the
//! rendered markup is handed back, so parsing never runs with a live browser.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch::PageSource;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Launches a browser, navigates, waits a fixed dwell, captures the DOM.
pub struct BrowserFetcher {
    user_agent: String,
    render_wait: Duration,
    chrome_executable: Option<PathBuf>,
    headless: bool,
}

impl BrowserFetcher {
    /// Creates a fetcher that waits `render_wait` after navigation.
    pub fn new(config: &Config, render_wait: Duration) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            render_wait,
            chrome_executable: config.chrome_executable.clone(),
            headless: config.headless,
        }
    }

    pub fn render_wait(&self) -> Duration {
        self.render_wait
    }

    /// Extra Chromium flags on top of the sandbox switch.
    pub fn launch_args(&self) -> Vec<String> {
        vec!["--disable-dev-shm-usage".to_string(), format!("--user-agent={}", self.user_agent)]
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScrapeError> {
        let mut builder = BrowserConfig::builder().no_sandbox().args(self.launch_args());

        if !self.headless {
            builder = builder.with_head();
        }

        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(|e| ScrapeError::fetch("Failed to configure browser", e))
    }
}

#[async_trait]
impl PageSource for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let session = BrowserSession::launch(self.browser_config()?).await?;

        // Close regardless of how rendering went
        let rendered = session.render(url, self.render_wait).await;
        session.close().await;

        rendered
    }
}

/// Owns the browser process and its DevTools event loop.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig) -> Result<Self, ScrapeError> {
        info!("Launching browser");

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::fetch("Failed to launch browser", e))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser event error: {}", e);
                }
            }
        });

        Ok(Self { browser, handler })
    }

    async fn render(&self, url: &str, wait: Duration) -> Result<String, ScrapeError> {
        debug!("Navigating to {}", url);

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| ScrapeError::fetch("Failed to load page", e))?;

        debug!("Waiting {}ms for client-side rendering", wait.as_millis());
        tokio::time::sleep(wait).await;

        page.content().await.map_err(|e| ScrapeError::fetch("Failed to read page source", e))
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Failed to reap browser process: {}", e);
        }
        debug!("Browser closed");
    }
}

impl Drop for BrowserSession {
    // Browser's own Drop kills a still-running child process.
    fn drop(&mut self) {
        self.handler.abort();
    }
}
