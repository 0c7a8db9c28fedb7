use crate::browser::{ContextProvider, RenderingContext};
use crate::config::SearchConfig;
use crate::error::BrowserError;
use async_trait::async_trait;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Common WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

const READY_STATE_POLL: Duration = Duration::from_millis(50);

impl From<fantoccini::error::CmdError> for BrowserError {
    fn from(error: fantoccini::error::CmdError) -> Self {
        BrowserError::Command(error.to_string())
    }
}

/// Opens one WebDriver session per rendering context
pub struct WebDriverProvider {
    webdriver_url: String,
    headless: bool,
    // Endpoint that last accepted a session
    connected_url: Mutex<Option<String>>,
    warned: AtomicBool,
}

impl WebDriverProvider {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            connected_url: Mutex::new(None),
            warned: AtomicBool::new(false),
        }
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::new();
        // Return from navigation once the DOM is parsed rather than fully loaded
        caps.insert("pageLoadStrategy".to_string(), json!("eager"));
        if self.headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless=new", "--disable-gpu", "--no-sandbox"] }),
            );
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({ "args": ["-headless"] }),
            );
        }
        caps
    }

    async fn connect(&self, url: &str) -> Result<Client, BrowserError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());
        builder
            .connect(url)
            .await
            .map_err(|e| BrowserError::Connect(format!("{}: {}", url, e)))
    }

    /// Endpoints in connection order: the last one that worked, the configured
    /// one, then the common alternatives
    fn candidate_urls(&self, remembered: Option<&str>) -> Vec<String> {
        let mut urls: Vec<String> = Vec::with_capacity(FALLBACK_WEBDRIVER_URLS.len() + 2);
        let ordered = remembered
            .into_iter()
            .chain(std::iter::once(self.webdriver_url.as_str()))
            .chain(FALLBACK_WEBDRIVER_URLS.iter().copied());
        for url in ordered {
            if !urls.iter().any(|known| known == url) {
                urls.push(url.to_string());
            }
        }
        urls
    }

    /// Connects to the WebDriver instance, trying common alternatives on failure
    async fn connect_to_webdriver(&self) -> Result<Client, BrowserError> {
        let remembered = self.connected_url.lock().await.clone();
        let mut first_error = None;

        for (attempt, url) in self
            .candidate_urls(remembered.as_deref())
            .into_iter()
            .enumerate()
        {
            if attempt > 0 {
                ::log::debug!("Trying WebDriver URL: {}", url);
            }

            match self.connect(&url).await {
                Ok(client) => {
                    ::log::debug!("Connected to WebDriver at {}", url);
                    if remembered.as_deref() != Some(url.as_str()) {
                        *self.connected_url.lock().await = Some(url);
                    }
                    return Ok(client);
                }
                // Every session opens through here, so only the first failure is worth a warning
                Err(e) if attempt == 0 && !self.warned.swap(true, Ordering::Relaxed) => {
                    ::log::warn!(
                        "Failed to connect to WebDriver at {}: {}. Make sure a WebDriver server \
                         is running or set the WEBDRIVER_URL environment variable",
                        url,
                        e
                    );
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    ::log::debug!("Failed to connect to WebDriver at {}: {}", url, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(first_error
            .unwrap_or_else(|| BrowserError::Connect("no WebDriver endpoint to try".to_string())))
    }
}

#[async_trait]
impl ContextProvider for WebDriverProvider {
    async fn new_context(&self) -> Result<Box<dyn RenderingContext>, BrowserError> {
        let client = self.connect_to_webdriver().await?;
        Ok(Box::new(WebDriverContext { client }))
    }
}

/// A rendering context backed by its own WebDriver session
pub struct WebDriverContext {
    client: Client,
}

#[async_trait]
impl RenderingContext for WebDriverContext {
    async fn goto(&self, url: &str, limit: Duration) -> Result<(), BrowserError> {
        match timeout(limit, self.client.goto(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(BrowserError::Timeout(limit)),
        }
    }

    async fn wait_for_idle(&self, limit: Duration) -> Result<(), BrowserError> {
        let settled = timeout(limit, async {
            loop {
                let state = self
                    .client
                    .execute("return document.readyState", Vec::new())
                    .await?;
                if state.as_str() == Some("complete") {
                    return Ok::<(), BrowserError>(());
                }
                tokio::time::sleep(READY_STATE_POLL).await;
            }
        })
        .await;

        match settled {
            Ok(result) => result,
            Err(_) => Err(BrowserError::Timeout(limit)),
        }
    }

    async fn document_html(&self) -> Result<String, BrowserError> {
        let markup = self
            .client
            .execute("return document.documentElement.outerHTML", Vec::new())
            .await?;

        markup
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| BrowserError::Command("document markup is not available".to_string()))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.client.clone().close().await?;
        Ok(())
    }
}
