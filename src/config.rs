use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a web search and the extraction of its result pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Whether browser sessions should be started headless
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Base URL of the search engine results page
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Request the "web results only" view of the results page
    #[serde(default = "default_web_results_only")]
    pub web_results_only: bool,

    /// CSS selector matching result links on the results page
    #[serde(default = "default_result_link_selector")]
    pub result_link_selector: String,

    /// CSS selector that identifies a CAPTCHA or block page
    #[serde(default = "default_blocked_page_selector")]
    pub blocked_page_selector: String,

    /// Regex patterns a result URL must match (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for result URLs to skip
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Timeout for loading the results page
    #[serde(default = "default_search_page_timeout_ms")]
    pub search_page_timeout_ms: u64,

    /// Timeout for navigating to a result page
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// How long to wait for a result page to settle after navigation
    #[serde(default = "default_network_idle_timeout_ms")]
    pub network_idle_timeout_ms: u64,

    /// Failed markup reads tolerated before a page is given up on
    #[serde(default = "default_max_read_retries")]
    pub max_read_retries: usize,

    /// Delay between markup read attempts
    #[serde(default = "default_read_retry_delay_ms")]
    pub read_retry_delay_ms: u64,

    /// Maximum number of characters of content kept per page
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_search_url() -> String {
    "https://www.google.com/search".to_string()
}

fn default_web_results_only() -> bool {
    true
}

fn default_result_link_selector() -> String {
    "#rso a[jsname]".to_string()
}

fn default_blocked_page_selector() -> String {
    r#"#captcha-form, form[action*="sorry"]"#.to_string()
}

/// Video pages have no readable text
fn default_exclude_patterns() -> Vec<String> {
    vec![r"youtube\.com/watch\?v".to_string()]
}

fn default_search_page_timeout_ms() -> u64 {
    30_000
}

fn default_navigation_timeout_ms() -> u64 {
    1_000
}

fn default_network_idle_timeout_ms() -> u64 {
    1_000
}

fn default_max_read_retries() -> usize {
    2
}

fn default_read_retry_delay_ms() -> u64 {
    100
}

fn default_max_content_chars() -> usize {
    50_000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            search_url: default_search_url(),
            web_results_only: default_web_results_only(),
            result_link_selector: default_result_link_selector(),
            blocked_page_selector: default_blocked_page_selector(),
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
            search_page_timeout_ms: default_search_page_timeout_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            network_idle_timeout_ms: default_network_idle_timeout_ms(),
            max_read_retries: default_max_read_retries(),
            read_retry_delay_ms: default_read_retry_delay_ms(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl SearchConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SearchError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    pub fn search_page_timeout(&self) -> Duration {
        Duration::from_millis(self.search_page_timeout_ms)
    }

    pub fn read_retry_delay(&self) -> Duration {
        Duration::from_millis(self.read_retry_delay_ms)
    }
}
