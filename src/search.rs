use crate::browser::{self, ContextProvider, RenderingContext};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extract::{self, ExtractOptions};
use crate::filter::{ResultFilter, ResultFilterConfig};
use crate::parsers::{self, results_page};
use crate::results::{SearchResult, SearchResults};
use crate::utils;
use futures::future::join_all;
use scraper::Selector;
use url::Url;

/// Extraction contexts by slot; a slot is `None` if its context failed to open
type ContextPool = Vec<Option<Box<dyn RenderingContext>>>;

/// Runs a web search and extracts the content of each result page
pub struct Searcher<P> {
    provider: P,
    config: SearchConfig,
    filter: ResultFilter,
    link_selector: Selector,
    blocked_selector: Selector,
    extract_options: ExtractOptions,
}

impl<P: ContextProvider> Searcher<P> {
    /// Create a searcher, validating the selectors and patterns in `config`
    pub fn new(provider: P, config: SearchConfig) -> Result<Self, SearchError> {
        let filter = ResultFilter::new(ResultFilterConfig::from(&config))?;
        let link_selector = parsers::parse_selector(&config.result_link_selector)?;
        let blocked_selector = parsers::parse_selector(&config.blocked_page_selector)?;
        let extract_options = ExtractOptions::from(&config);

        // Fail early rather than on the first search
        utils::build_search_url(&config.search_url, "", config.web_results_only)
            .map_err(|e| SearchError::Config(format!("invalid search URL: {}", e)))?;

        Ok(Self {
            provider,
            config,
            filter,
            link_selector,
            blocked_selector,
            extract_options,
        })
    }

    /// Search for `query` and return up to `max_results` results with content,
    /// in the order they appear on the results page.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<SearchResults, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if max_results == 0 {
            return Ok(SearchResults::empty(query));
        }

        let search_url =
            utils::build_search_url(&self.config.search_url, query, self.config.web_results_only)
                .map_err(|e| SearchError::Config(format!("invalid search URL: {}", e)))?;
        ::log::info!("Searching for {:?} (max {} results)", query, max_results);

        let (results_context, pool) = self.open_contexts(max_results).await?;

        let discovered = self.discover(results_context.as_ref(), &search_url).await;
        browser::release(results_context);

        let links = match discovered {
            Ok(links) => self.filter.select(links, max_results),
            Err(e) => {
                browser::release_all(pool);
                return Err(e);
            }
        };
        ::log::info!("Extracting content from {} results", links.len());

        // One pre-allocated context per result, in discovery order
        let mut contexts = pool.into_iter();
        let options = &self.extract_options;
        let tasks = links
            .into_iter()
            .zip(contexts.by_ref())
            .map(|(link, context)| async move {
                let content = match context {
                    Some(context) => extract::extract(context, &link.url, options).await,
                    None => String::new(),
                };
                (link, content)
            })
            .collect::<Vec<_>>();
        browser::release_all(contexts);

        let results = join_all(tasks)
            .await
            .into_iter()
            .filter_map(|(link, content)| {
                if content.is_empty() {
                    ::log::debug!("Dropping {}: no content extracted", link.url);
                    None
                } else {
                    Some(SearchResult::new(link.url, link.title, Some(content)))
                }
            })
            .collect::<Vec<_>>();

        ::log::info!("Search for {:?} produced {} results", query, results.len());
        Ok(SearchResults {
            query: query.to_string(),
            results,
        })
    }

    /// Opens the results page context plus `count` extraction contexts
    async fn open_contexts(
        &self,
        count: usize,
    ) -> Result<(Box<dyn RenderingContext>, ContextPool), SearchError> {
        let (results_context, pool) = futures::join!(
            self.provider.new_context(),
            join_all((0..count).map(|_| self.provider.new_context()))
        );

        let pool = pool
            .into_iter()
            .enumerate()
            .map(|(slot, opened)| match opened {
                Ok(context) => Some(context),
                Err(e) => {
                    ::log::warn!("Failed to open rendering context {}: {}", slot, e);
                    None
                }
            })
            .collect::<Vec<_>>();

        match results_context {
            Ok(context) => Ok((context, pool)),
            Err(e) => {
                browser::release_all(pool);
                Err(SearchError::Browser(e))
            }
        }
    }

    /// Loads the results page and collects its result links
    async fn discover(
        &self,
        context: &dyn RenderingContext,
        search_url: &Url,
    ) -> Result<Vec<results_page::ResultLink>, SearchError> {
        context
            .goto(search_url.as_str(), self.config.search_page_timeout())
            .await
            .map_err(|e| SearchError::SearchPageUnavailable(e.to_string()))?;

        let html = extract::read_document(context, search_url.as_str(), &self.extract_options)
            .await
            .ok_or_else(|| {
                SearchError::SearchPageUnavailable("results page never became readable".into())
            })?;

        if results_page::is_blocked(&html, &self.blocked_selector) {
            ::log::warn!("Search engine returned a block page for {}", search_url);
            return Err(SearchError::SearchPageUnavailable(
                "request was blocked by the search engine".into(),
            ));
        }

        Ok(results_page::parse_result_links(
            &html,
            search_url,
            &self.link_selector,
        ))
    }
}
