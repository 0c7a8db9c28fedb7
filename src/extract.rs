use crate::browser::{self, RenderingContext};
use crate::config::SearchConfig;
use crate::parsers::content;
use std::time::Duration;

/// Tunables for extracting a single page
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Navigation timeout
    pub navigation_timeout: Duration,
    /// How long to wait for the page to settle after navigation
    pub idle_timeout: Duration,
    /// Failed markup reads tolerated before giving up
    pub max_read_retries: usize,
    /// Delay between markup reads
    pub retry_delay: Duration,
    /// Content is truncated to this many characters
    pub max_content_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for ExtractOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            navigation_timeout: Duration::from_millis(config.navigation_timeout_ms),
            idle_timeout: Duration::from_millis(config.network_idle_timeout_ms),
            max_read_retries: config.max_read_retries,
            retry_delay: config.read_retry_delay(),
            max_content_chars: config.max_content_chars,
        }
    }
}

/// Loads `url` in the given context and returns its main content as Markdown.
///
/// The context is consumed and released as soon as the markup has been read.
/// Any failure yields an empty string.
pub async fn extract(
    context: Box<dyn RenderingContext>,
    url: &str,
    options: &ExtractOptions,
) -> String {
    // A slow page is not fatal; read whatever it managed to render
    match context.goto(url, options.navigation_timeout).await {
        Ok(()) => {
            if let Err(e) = context.wait_for_idle(options.idle_timeout).await {
                ::log::warn!("slow page: {} ({})", url, e);
            }
        }
        Err(e) => ::log::warn!("slow page: {} ({})", url, e),
    }

    let html = read_document(context.as_ref(), url, options).await;
    browser::release(context);

    match html {
        Some(html) => {
            let markdown = content::extract_main_content(&html, options.max_content_chars);
            ::log::debug!(
                "Extracted {} characters from {}",
                markdown.chars().count(),
                url
            );
            markdown
        }
        None => {
            ::log::warn!("Giving up on {}: page markup never became readable", url);
            String::new()
        }
    }
}

/// Polls for the rendered markup until it is readable or too many reads failed
pub async fn read_document(
    context: &dyn RenderingContext,
    url: &str,
    options: &ExtractOptions,
) -> Option<String> {
    let mut failures = 0;
    loop {
        match context.document_html().await {
            Ok(html) if !html.is_empty() => return Some(html),
            Ok(_) => ::log::debug!("Document for {} is still empty", url),
            Err(e) => ::log::debug!("Failed to read document for {}: {}", url, e),
        }

        failures += 1;
        if failures > options.max_read_retries {
            return None;
        }
        tokio::time::sleep(options.retry_delay).await;
    }
}
