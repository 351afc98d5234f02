//! Error taxonomy shared by both scrapers.

use serde::Serialize;
use thiserror::Error;

/// Everything that can end a scrape invocation.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Malformed or missing command-line arguments. Raised before any I/O.
    #[error("{0}")]
    Usage(String),

    /// Transport failure: HTTP error status, DNS/connect error, timeout,
    /// browser launch or navigation failure.
    #[error("{0}")]
    Fetch(String),

    /// Expected structured data was entirely absent from the page.
    #[error("{0}")]
    Extraction(String),

    /// The `--config` file could not be read or parsed.
    #[error("{0}")]
    Config(String),
}

impl ScrapeError {
    pub fn fetch(context: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Fetch(format!("{}: {}", context, err))
    }

    /// Single-key object written to stderr when an invocation fails.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport { error: self.to_string() }
    }
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        ScrapeError::Config(format!("{:#}", err))
    }
}

/// Wire shape of a failure: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
}
