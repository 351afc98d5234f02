//! Normalized product record emitted by every scraper.

use serde::{Serialize, Serializer};
use std::fmt;

/// Wire placeholder for a price that could not be determined.
pub const PRICE_SENTINEL: &str = "N/A";

/// Site that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    Amazon,
    Mercari,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Amazon => write!(f, "Amazon"),
            Source::Mercari => write!(f, "Mercari"),
        }
    }
}

/// Whole-yen price, possibly absent.
///
/// Serializes as a JSON integer, or as the `"N/A"` string when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Price(pub Option<u64>);

impl Price {
    pub fn yen(amount: u64) -> Self {
        Price(Some(amount))
    }

    pub fn absent() -> Self {
        Price(None)
    }

    pub fn amount(&self) -> Option<u64> {
        self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<u64>> for Price {
    fn from(value: Option<u64>) -> Self {
        Price(value)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(amount) => serializer.serialize_u64(amount),
            None => serializer.serialize_str(PRICE_SENTINEL),
        }
    }
}

/// A single listing. Field order matches the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Trimmed, non-empty listing title
    pub title: String,
    /// Price in yen
    pub price: Price,
    /// Absolute listing URL
    pub url: String,
    /// Producing site
    pub source: Source,
}

impl Product {
    pub fn new(
        title: impl Into<String>,
        price: Price,
        url: impl Into<String>,
        source: Source,
    ) -> Self {
        Self { title: title.into(), price, url: url.into(), source }
    }
}
