pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod search;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::SearchConfig;
pub use error::{BrowserError, SearchError};
pub use results::{SearchResult, SearchResults};
pub use search::Searcher;

use browser::webdriver::WebDriverProvider;

/// Search the web for `query` and extract the content of up to `max_results` result pages.
///
/// Uses the default configuration with the `WEBDRIVER_URL` environment
/// variable applied, and a WebDriver session per rendering context.
pub async fn search(query: &str, max_results: usize) -> Result<SearchResults, SearchError> {
    let config = SearchConfig::default().with_env_overrides();
    let provider = WebDriverProvider::new(&config);
    Searcher::new(provider, config)?
        .search(query, max_results)
        .await
}
