use serde::{Deserialize, Serialize};

/// A single search hit with the content extracted from its page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// URL of the result, as linked from the results page
    pub url: String,

    /// Title shown on the results page (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Markdown-flavored main content of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(url: String, title: Option<String>, content: Option<String>) -> Self {
        Self {
            url,
            title,
            content,
        }
    }
}

/// All results for one query, in the order they were discovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    /// Create an empty result set for a query
    pub fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            results: Vec::new(),
        }
    }
}
