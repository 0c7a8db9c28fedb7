pub mod content;
pub mod markdown;
pub mod results_page;


use crate::error::SearchError;
use scraper::Selector;

/// Compiles a selector taken from configuration
pub fn parse_selector(selector: &str) -> Result<Selector, SearchError> {
    Selector::parse(selector)
        .map_err(|e| SearchError::Config(format!("invalid selector {:?}: {}", selector, e)))
}
