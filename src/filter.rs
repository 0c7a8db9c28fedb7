use crate::config::SearchConfig;
use crate::parsers::results_page::ResultLink;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Configuration for deciding which result links get extracted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFilterConfig {
    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for ResultFilterConfig {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for ResultFilterConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            include_patterns: config.include_patterns.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
        }
    }
}

/// Result link filter that uses regex patterns and scheme checks
#[derive(Debug)]
pub struct ResultFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl ResultFilter {
    /// Create a new result filter from configuration
    pub fn new(config: ResultFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if a result URL is worth extracting
    pub fn is_eligible(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        // Only web pages can be rendered
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return false,
        }

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(url))
    }

    /// Pick up to `max` eligible, distinct links, keeping page order
    pub fn select(&self, links: Vec<ResultLink>, max: usize) -> Vec<ResultLink> {
        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(max);

        for link in links {
            if accepted.len() >= max {
                break;
            }

            if !self.is_eligible(&link.url) {
                ::log::debug!("Result filter rejected: {:?}", link.url);
                continue;
            }

            if !seen.insert(link.url.clone()) {
                ::log::trace!("Skipping duplicate result: {}", link.url);
                continue;
            }

            accepted.push(link);
        }

        accepted
    }
}
