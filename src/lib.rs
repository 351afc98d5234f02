//! market-scraper - Amazon Japan and Mercari product scrapers
//!
//! Each scraper fetches one page (rendered in headless Chromium or over
//! plain HTTP), extracts listings with CSS selectors or embedded JSON-LD,
//! and prints normalized products as JSON.

pub mod amazon;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod format;
pub mod mercari;
pub mod models;

pub use config::Config;
pub use error::ScrapeError;
pub use extract::Extractor;
pub use models::{Price, Product, Source};
