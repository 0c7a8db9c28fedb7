use crate::utils;
use scraper::{Html, Selector};
use url::Url;

/// A result link found on the search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLink {
    /// Absolute URL of the result, or empty if the anchor had no href
    pub url: String,
    /// Heading text shown for the result
    pub title: Option<String>,
}

/// Collects result links from the results page in page order
pub fn parse_result_links(html: &str, base_url: &Url, link_selector: &Selector) -> Vec<ResultLink> {
    let doc = Html::parse_document(html);
    let heading_selector = Selector::parse("h3").expect("built-in selector should parse");

    let links = doc
        .select(link_selector)
        .map(|anchor| {
            let href = anchor.value().attr("href").unwrap_or("").trim();
            let url = if href.is_empty() {
                String::new()
            } else {
                base_url
                    .join(href)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| href.to_string())
            };

            let title = anchor
                .select(&heading_selector)
                .next()
                .map(|h| utils::normalize_whitespace(&h.text().collect::<String>()))
                .filter(|t| !t.is_empty());

            ResultLink { url, title }
        })
        .collect::<Vec<_>>();

    ::log::debug!("Results page yielded {} candidate links", links.len());
    links
}

/// Whether the page is a CAPTCHA or block page instead of results
pub fn is_blocked(html: &str, blocked_selector: &Selector) -> bool {
    Html::parse_document(html)
        .select(blocked_selector)
        .next()
        .is_some()
}
