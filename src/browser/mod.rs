//! Rendering contexts: isolated browser sessions that can load a page and
//! hand back its rendered markup.

pub mod webdriver;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::BrowserError;
use async_trait::async_trait;
use std::time::Duration;

/// An isolated browsing session owned by exactly one task at a time
#[async_trait]
pub trait RenderingContext: Send + Sync {
    /// Navigate to a URL, giving up after `timeout`
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Wait for the current page to settle, giving up after `timeout`
    async fn wait_for_idle(&self, timeout: Duration) -> Result<(), BrowserError>;

    /// Read the fully rendered document markup
    async fn document_html(&self) -> Result<String, BrowserError>;

    /// End the session
    async fn close(&self) -> Result<(), BrowserError>;
}

/// Source of fresh rendering contexts
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn new_context(&self) -> Result<Box<dyn RenderingContext>, BrowserError>;
}

/// Closes a context in the background without making the caller wait
pub fn release(context: Box<dyn RenderingContext>) {
    tokio::spawn(async move {
        if let Err(e) = context.close().await {
            ::log::warn!("Failed to close rendering context: {}", e);
        }
    });
}

/// Releases every context that was opened
pub fn release_all<I>(contexts: I)
where
    I: IntoIterator<Item = Option<Box<dyn RenderingContext>>>,
{
    contexts.into_iter().flatten().for_each(release);
}
