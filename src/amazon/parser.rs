//! HTML parser for Amazon search results.

use crate::amazon::selectors::{errors, search};
use crate::error::ScrapeError;
use crate::extract::Extractor;
use crate::models::{Price, Product, Source};
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};

/// Parser for rendered Amazon search result pages.
pub struct SearchParser {
    origin: String,
}

impl SearchParser {
    /// Creates a parser that resolves relative links against `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self { origin: origin.into().trim_end_matches('/').to_string() }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Builds the first results page URL for a query.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/s?k={}", self.origin, urlencoding::encode(query))
    }

    /// Parses every complete result card, in document order.
    ///
    /// Zero complete cards is a valid, empty result.
    pub fn parse_search(&self, html: &str) -> Vec<Product> {
        let document = Html::parse_document(html);

        if document.select(&errors::CAPTCHA).next().is_some() {
            warn!("CAPTCHA page detected; Amazon is blocking automated requests");
        }

        let products: Vec<Product> = document
            .select(&search::CANDIDATE)
            .filter(|element| {
                element.value().attr(search::COMPONENT_TYPE_ATTR) == Some(search::RESULT_COMPONENT)
            })
            .filter_map(|element| self.parse_result_card(element))
            .collect();

        debug!("Parsed {} products from search page", products.len());
        products
    }

    /// Parses a single result card, or `None` if any required part is missing.
    fn parse_result_card(&self, element: ElementRef) -> Option<Product> {
        let asin = element.value().attr("data-asin").unwrap_or_default();

        let (Some(title_el), Some(price_el), Some(link_el)) = (
            element.select(&search::TITLE).next(),
            element.select(&search::PRICE_WHOLE).next(),
            element.select(&search::TITLE_LINK).next(),
        ) else {
            trace!("Skipping incomplete result card {}", asin);
            return None;
        };

        let title = stripped_text(title_el);
        if title.is_empty() {
            trace!("Skipping result card {} with empty title", asin);
            return None;
        }

        let price_text = stripped_text(price_el);
        let Some(price) = parse_price_whole(&price_text) else {
            warn!("Skipping result card {}: unparseable price '{}'", asin, price_text);
            return None;
        };

        let href = link_el.value().attr("href")?;

        Some(Product::new(title, Price::yen(price), self.absolute_url(href), Source::Amazon))
    }

    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{}", self.origin, href)
        }
    }
}

impl Extractor for SearchParser {
    fn source(&self) -> Source {
        Source::Amazon
    }

    fn extract(&self, html: &str) -> Result<Vec<Product>, ScrapeError> {
        Ok(self.parse_search(html))
    }
}

/// Concatenates an element's text nodes, each trimmed.
fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

/// Parses the whole-number price, e.g. "1,980" or "1,980." -> 1980.
fn parse_price_whole(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().trim_end_matches('.').chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.amazon.co.jp";

    fn card(asin: &str, title: Option<&str>, price: Option<&str>) -> String {
        let title_html = title
            .map(|t| format!(r#"<span class="a-size-base-plus a-text-normal">{}</span>"#, t))
            .unwrap_or_default();
        let price_html = price
            .map(|p| format!(r#"<span class="a-price"><span class="a-price-whole">{}</span></span>"#, p))
            .unwrap_or_default();

        format!(
            r#"<div data-asin="{asin}" data-component-type="s-search-result">
                <h2><a class="a-link-normal s-link-style" href="/dp/{asin}">{title_html}</a></h2>
                {price_html}
            </div>"#
        )
    }

    #[test]
    fn test_parse_price_whole() {
        assert_eq!(parse_price_whole("1,980"), Some(1980));
        assert_eq!(parse_price_whole("12,345,678"), Some(12345678));
        assert_eq!(parse_price_whole("980"), Some(980));
        assert_eq!(parse_price_whole(" 1,980. "), Some(1980));
    }

    #[test]
    fn test_parse_price_whole_invalid() {
        assert_eq!(parse_price_whole(""), None);
        assert_eq!(parse_price_whole("   "), None);
        assert_eq!(parse_price_whole("￥"), None);
        assert_eq!(parse_price_whole("価格不明"), None);
    }

    #[test]
    fn test_search_url() {
        let parser = SearchParser::new(ORIGIN);
        assert_eq!(
            parser.search_url("rust programming"),
            "https://www.amazon.co.jp/s?k=rust%20programming"
        );
    }

    #[test]
    fn test_search_url_encodes_japanese() {
        let parser = SearchParser::new(ORIGIN);
        let url = parser.search_url("イヤホン");
        assert!(url.starts_with("https://www.amazon.co.jp/s?k=%E3%82%A4"));
    }

    #[test]
    fn test_origin_trailing_slash_trimmed() {
        let parser = SearchParser::new("https://www.amazon.co.jp/");
        assert_eq!(parser.origin(), ORIGIN);
    }

    #[test]
    fn test_parse_complete_card() {
        let parser = SearchParser::new(ORIGIN);
        let html = format!(
            "<html><body>{}</body></html>",
            card("B0TEST0001", Some("  ワイヤレスイヤホン  "), Some("2,480"))
        );

        let products = parser.parse_search(&html);
        assert_eq!(products.len(), 1);

        let product = &products[0];
        assert_eq!(product.title, "ワイヤレスイヤホン");
        assert_eq!(product.price, Price::yen(2480));
        assert_eq!(product.url, "https://www.amazon.co.jp/dp/B0TEST0001");
        assert_eq!(product.source, Source::Amazon);
    }

    #[test]
    fn test_incomplete_cards_dropped() {
        let parser = SearchParser::new(ORIGIN);
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            card("B0NOPRICE1", Some("No price"), None),
            card("B0COMPLETE", Some("Complete"), Some("1,000")),
            card("B0NOTITLE1", None, Some("500")),
        );

        let products = parser.parse_search(&html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Complete");
    }

    #[test]
    fn test_non_result_components_ignored() {
        let parser = SearchParser::new(ORIGIN);
        let html = r#"
            <html><body>
                <div data-asin="B0AD000001" data-component-type="sp-sponsored-result">
                    <h2><a class="a-link-normal" href="/dp/B0AD000001"><span class="a-text-normal">Ad</span></a></h2>
                    <span class="a-price-whole">100</span>
                </div>
                <div data-asin="B0CAROUSEL">
                    <h2><a class="a-link-normal" href="/dp/B0CAROUSEL"><span class="a-text-normal">Carousel</span></a></h2>
                    <span class="a-price-whole">200</span>
                </div>
            </body></html>
        "#;

        assert!(parser.parse_search(html).is_empty());
    }

    #[test]
    fn test_unparseable_price_dropped() {
        let parser = SearchParser::new(ORIGIN);
        let html = card("B0BADPRICE", Some("Bad price"), Some("お問い合わせ"));
        assert!(parser.parse_search(&html).is_empty());
    }

    #[test]
    fn test_absolute_href_kept() {
        let parser = SearchParser::new(ORIGIN);
        let html = r#"
            <div data-asin="B0ABS00001" data-component-type="s-search-result">
                <h2><a class="a-link-normal" href="https://www.amazon.co.jp/dp/B0ABS00001"><span class="a-text-normal">Abs</span></a></h2>
                <span class="a-price-whole">300</span>
            </div>
        "#;

        let products = parser.parse_search(html);
        assert_eq!(products[0].url, "https://www.amazon.co.jp/dp/B0ABS00001");
    }

    #[test]
    fn test_empty_page_is_empty_result() {
        let parser = SearchParser::new(ORIGIN);
        let products = parser.extract("<html><body><div id=\"search\"></div></body></html>");
        assert!(products.unwrap().is_empty());
    }

    #[test]
    fn test_captcha_page_is_empty_result() {
        let parser = SearchParser::new(ORIGIN);
        let html = r#"<html><body><form action="/errors/validateCaptcha"></form></body></html>"#;
        assert!(parser.parse_search(html).is_empty());
    }

    #[test]
    fn test_extractor_source() {
        assert_eq!(SearchParser::new(ORIGIN).source(), Source::Amazon);
    }
}
