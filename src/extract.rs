//! Narrow extraction seam shared by every site parser.

use crate::error::ScrapeError;
use crate::models::{Product, Source};

/// Turns one fetched document into normalized products.
///
/// Implementations own their selectors, so a markup change on one site
/// touches exactly one implementation and its fixtures.
pub trait Extractor {
    /// Site label stamped on every product this extractor emits.
    fn source(&self) -> Source;

    /// Extracts products in document order.
    fn extract(&self, html: &str) -> Result<Vec<Product>, ScrapeError>;
}
