//! CSS selectors for Amazon HTML parsing.
//!
//! This file contains all CSS selectors used for parsing Amazon pages.
//! Update this file when Amazon changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search results pages.
pub mod search {
    use super::*;

    /// Any block carrying a product identifier.
    pub static CANDIDATE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-asin]").unwrap());

    /// Attribute naming the component type of a candidate block.
    pub static COMPONENT_TYPE_ATTR: &str = "data-component-type";

    /// Component type of a genuine search result card.
    pub static RESULT_COMPONENT: &str = "s-search-result";

    /// Product title text inside the title link.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h2 a.a-link-normal span.a-text-normal").unwrap());

    /// Whole-number part of the displayed price.
    pub static PRICE_WHOLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-price-whole").unwrap());

    /// Title link for URL extraction.
    pub static TITLE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h2 a.a-link-normal").unwrap());
}

/// Selectors for detecting interstitials instead of results.
pub mod errors {
    use super::*;

    /// CAPTCHA form.
    pub static CAPTCHA: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("form[action*='validateCaptcha']").unwrap());
}
