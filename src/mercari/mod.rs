//! Mercari scraping: item detail pages and homepage new listings.

pub mod parser;
pub mod selectors;

pub use parser::{NewListingsParser, ProductPageParser};
