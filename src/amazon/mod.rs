//! Amazon Japan search scraping: selectors and result-card parsing.

pub mod parser;
pub mod selectors;

pub use parser::SearchParser;
