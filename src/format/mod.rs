//! JSON output for products and failure reports.
//!
//! All output is UTF-8 with non-ASCII left unescaped.

use crate::error::ScrapeError;
use crate::models::Product;
use serde::Serialize;

/// Serializes results for stdout and errors for stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    pretty: bool,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats a single product as a JSON object.
    pub fn format_product(&self, product: &Product) -> String {
        self.to_json(product, "{}")
    }

    /// Formats products as a JSON array; empty input yields `[]`.
    pub fn format_products(&self, products: &[Product]) -> String {
        self.to_json(products, "[]")
    }

    /// Formats a failure as `{"error": "..."}`, always on one line.
    pub fn format_error(&self, err: &ScrapeError) -> String {
        serde_json::to_string(&err.to_report()).unwrap_or_else(|_| r#"{"error":"unknown"}"#.into())
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }
}
