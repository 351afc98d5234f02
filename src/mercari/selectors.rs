//! CSS selectors for Mercari pages.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for a single item detail page.
pub mod product {
    use super::*;

    /// Document title.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

    /// Displayed price, e.g. "¥1,234".
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-testid='price']").unwrap());
}

/// Selectors for the homepage.
pub mod home {
    use super::*;

    /// Embedded linked-data blocks.
    pub static JSON_LD: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("script[type='application/ld+json']").unwrap());
}
