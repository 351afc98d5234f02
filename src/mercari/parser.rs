//! Parsers for Mercari item pages and the homepage's JSON-LD item list.

use crate::error::ScrapeError;
use crate::extract::Extractor;
use crate::mercari::selectors::{home, product};
use crate::models::{Price, Product, Source};
use scraper::Html;
use serde_json::Value;
use tracing::{debug, trace};

const TITLE_NOT_FOUND: &str = "No title found";
const PRICE_NOT_FOUND: &str = "Price not found";

const NO_STRUCTURED_DATA: &str = "Could not find any ld+json structured data on the page.";
const NO_ITEMS: &str = "Found ld+json data, but could not extract new items from it.";

/// Parser for a single Mercari item page fetched from `url`.
pub struct ProductPageParser {
    url: String,
}

impl ProductPageParser {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Always yields a product; missing fields fall back to placeholders.
    pub fn parse_product_page(&self, html: &str) -> Product {
        let document = Html::parse_document(html);

        let title = document
            .select(&product::TITLE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

        let digits: String = match document.select(&product::PRICE).next() {
            Some(element) => {
                element.text().flat_map(str::chars).filter_map(decimal_digit).collect()
            }
            None => {
                debug!("No price element on {}", self.url);
                PRICE_NOT_FOUND.to_string()
            }
        };

        Product::new(title, resolve_digits(&digits), self.url.clone(), Source::Mercari)
    }
}

impl Extractor for ProductPageParser {
    fn source(&self) -> Source {
        Source::Mercari
    }

    fn extract(&self, html: &str) -> Result<Vec<Product>, ScrapeError> {
        Ok(vec![self.parse_product_page(html)])
    }
}

/// ASCII form of a decimal digit, full-width (`０`..`９`) included.
fn decimal_digit(c: char) -> Option<char> {
    let value = match c {
        '\u{FF10}'..='\u{FF19}' => c as u32 - 0xFF10,
        _ => c.to_digit(10)?,
    };
    char::from_digit(value, 10)
}

/// Integer price when `digits` is a non-empty run of ASCII digits.
fn resolve_digits(digits: &str) -> Price {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Price::absent();
    }
    Price(digits.parse::<u64>().ok())
}

/// Parser for the "new listings" ItemList embedded in the homepage.
pub struct NewListingsParser {
    origin: String,
}

impl NewListingsParser {
    /// Creates a parser resolving relative item URLs against `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self { origin: origin.into().trim_end_matches('/').to_string() }
    }

    /// Extracts items from the first `ItemList` JSON-LD block.
    ///
    /// Unlike search pages, finding nothing here is an error.
    pub fn parse_new_listings(&self, html: &str) -> Result<Vec<Product>, ScrapeError> {
        let document = Html::parse_document(html);

        let blocks: Vec<String> =
            document.select(&home::JSON_LD).map(|e| e.text().collect()).collect();

        if blocks.is_empty() {
            return Err(ScrapeError::Extraction(NO_STRUCTURED_DATA.to_string()));
        }
        debug!("Found {} ld+json blocks", blocks.len());

        let mut products = Vec::new();
        for block in &blocks {
            let data: Value = match serde_json::from_str(block) {
                Ok(data) => data,
                Err(e) => {
                    debug!("Skipping malformed ld+json block: {}", e);
                    continue;
                }
            };

            if data.get("@type").and_then(Value::as_str) != Some("ItemList") {
                trace!("Skipping ld+json block of another type");
                continue;
            }

            products = self.parse_item_list(&data);
            break;
        }

        if products.is_empty() {
            return Err(ScrapeError::Extraction(NO_ITEMS.to_string()));
        }

        debug!("Parsed {} new listings", products.len());
        Ok(products)
    }

    fn parse_item_list(&self, data: &Value) -> Vec<Product> {
        data.get("itemListElement")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|element| element.get("item"))
            .filter_map(|item| self.parse_item(item))
            .collect()
    }

    fn parse_item(&self, item: &Value) -> Option<Product> {
        let name = non_empty_str(item.get("name"));
        let url = non_empty_str(item.get("url"));

        let (Some(name), Some(url)) = (name, url) else {
            trace!("Skipping item without name or url");
            return None;
        };

        let offers = match item.get("offers") {
            Some(Value::Array(offers)) => offers.first(),
            other => other,
        };
        let Some(price) = offers.and_then(|o| o.get("price")).and_then(coerce_price) else {
            trace!("Skipping item without a usable price: {}", name);
            return None;
        };

        Some(Product::new(name, Price::yen(price), self.absolute_url(url), Source::Mercari))
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            url.to_string()
        }
    }
}

impl Extractor for NewListingsParser {
    fn source(&self) -> Source {
        Source::Mercari
    }

    fn extract(&self, html: &str) -> Result<Vec<Product>, ScrapeError> {
        self.parse_new_listings(html)
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

/// Coerces a JSON-LD price (integer, float, or numeric string) to whole yen.
fn coerce_price(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(truncate_amount)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| s.parse::<f64>().ok().and_then(truncate_amount))
        }
        _ => None,
    }
}

fn truncate_amount(amount: f64) -> Option<u64> {
    if amount.is_finite() && amount >= 0.0 && amount < u64::MAX as f64 {
        Some(amount.trunc() as u64)
    } else {
        None
    }
}
