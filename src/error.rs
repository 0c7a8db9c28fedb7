use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to callers of a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query string was empty
    #[error("no query provided")]
    EmptyQuery,

    /// The results page could not be loaded, read, or was a block page
    #[error("search results page unavailable: {0}")]
    SearchPageUnavailable(String),

    /// No rendering context could be opened for the results page
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// A selector or pattern in the configuration is invalid
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a rendering context or its provider
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to connect to WebDriver: {0}")]
    Connect(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("browser command failed: {0}")]
    Command(String),
}

impl From<regex::Error> for SearchError {
    fn from(error: regex::Error) -> Self {
        SearchError::Config(error.to_string())
    }
}
