//! In-memory rendering contexts for exercising search and extraction.

use crate::browser::{ContextProvider, RenderingContext};
use crate::error::BrowserError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a fake page behaves when visited
#[derive(Debug, Clone, Default)]
pub(crate) struct FakePage {
    pub html: String,
    /// Number of markup reads that fail before one succeeds
    pub failing_reads: usize,
    /// Navigation reports a timeout (the page is still readable)
    pub slow_navigation: bool,
    /// Delay applied during navigation
    pub delay: Duration,
}

impl FakePage {
    pub fn html(html: &str) -> Self {
        Self {
            html: html.to_string(),
            ..Self::default()
        }
    }

    pub fn unreadable() -> Self {
        Self {
            failing_reads: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct FakeState {
    pages: Mutex<HashMap<String, FakePage>>,
    visits: Mutex<Vec<String>>,
    reads: Mutex<HashMap<String, usize>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
    open_calls: AtomicUsize,
    /// Ordinals of the `new_context` calls that fail
    fail_opens: Mutex<HashSet<usize>>,
}

/// A fake web shared by every context the provider hands out
#[derive(Clone, Default)]
pub(crate) struct FakeWeb {
    state: Arc<FakeState>,
}

impl FakeWeb {
    pub fn with_page(self, url: &str, page: FakePage) -> Self {
        self.state
            .pages
            .lock()
            .unwrap()
            .insert(url.to_string(), page);
        self
    }

    /// Makes the first `count` context openings fail
    pub fn failing_opens(self, count: usize) -> Self {
        self.state.fail_opens.lock().unwrap().extend(0..count);
        self
    }

    /// Makes the context opening with the given zero-based ordinal fail
    pub fn failing_open_at(self, ordinal: usize) -> Self {
        self.state.fail_opens.lock().unwrap().insert(ordinal);
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.visits.lock().unwrap().clone()
    }

    pub fn reads(&self, url: &str) -> usize {
        self.state
            .reads
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    pub fn context(&self) -> Box<dyn RenderingContext> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeContext {
            web: self.clone(),
            current: Mutex::new(None),
        })
    }

    fn page(&self, url: &str) -> Option<FakePage> {
        self.state.pages.lock().unwrap().get(url).cloned()
    }
}

#[async_trait]
impl ContextProvider for FakeWeb {
    async fn new_context(&self) -> Result<Box<dyn RenderingContext>, BrowserError> {
        let call = self.state.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_opens.lock().unwrap().contains(&call) {
            return Err(BrowserError::Connect("no session available".to_string()));
        }
        Ok(self.context())
    }
}

struct FakeContext {
    web: FakeWeb,
    current: Mutex<Option<String>>,
}

#[async_trait]
impl RenderingContext for FakeContext {
    async fn goto(&self, url: &str, limit: Duration) -> Result<(), BrowserError> {
        self.web.state.visits.lock().unwrap().push(url.to_string());
        *self.current.lock().unwrap() = Some(url.to_string());

        let page = self.web.page(url).unwrap_or_default();
        if !page.delay.is_zero() {
            tokio::time::sleep(page.delay).await;
        }
        if page.slow_navigation {
            return Err(BrowserError::Timeout(limit));
        }
        Ok(())
    }

    async fn wait_for_idle(&self, _limit: Duration) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn document_html(&self) -> Result<String, BrowserError> {
        let url = self
            .current
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BrowserError::Command("no page loaded".to_string()))?;

        let attempt = {
            let mut reads = self.web.state.reads.lock().unwrap();
            let count = reads.entry(url.clone()).or_insert(0);
            *count += 1;
            *count
        };

        match self.web.page(&url) {
            Some(page) if attempt > page.failing_reads => Ok(page.html),
            Some(_) => Err(BrowserError::Command("page not ready".to_string())),
            None => Err(BrowserError::Command(format!("unknown page {}", url))),
        }
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.web.state.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Lets detached close tasks run
pub(crate) async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
