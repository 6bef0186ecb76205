//! Paginated search coordinator
//!
//! Runs a lightweight search that yields identifiers only, then hydrates them
//! through a [`BatchResolver`]. Pagination is driven by the caller: the
//! coordinator keeps no cursor and never estimates a total.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::batch::{BatchConfig, BatchResolver, FetchWarning};
use crate::core::traits::{RecordFetcher, SearchBackend};
use crate::core::types::Record;
use crate::utils::error::{JiraError, Result};

/// Page size Jira uses when none is given
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// One page request. `next_page` is the caller-side continuation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub page_size: usize,
    pub offset: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_size: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Request for the following page (`offset += page_size`)
    pub fn next_page(&self) -> Self {
        Self {
            query: self.query.clone(),
            page_size: self.page_size,
            offset: self.offset.saturating_add(self.page_size),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(JiraError::InvalidArgument(
                "search query cannot be empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(JiraError::InvalidArgument(
                "page size must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hydrated page of search results
#[derive(Debug, Clone, Default)]
pub struct PagedResult {
    pub records: Vec<Record>,
    /// Copied unchanged from the search response
    pub is_last: bool,
    /// Identifiers the search returned but that could not be hydrated
    pub warnings: Vec<FetchWarning>,
}

/// Search + hydrate over a pair of collaborators
#[derive(Debug, Clone)]
pub struct SearchCoordinator<S, F> {
    search: S,
    resolver: BatchResolver<F>,
}

impl<S, F> SearchCoordinator<S, F>
where
    S: SearchBackend,
    F: RecordFetcher,
{
    /// Coordinator hydrating with the default batch config
    pub fn new(search: S, fetcher: F) -> Self {
        Self::with_batch_config(search, fetcher, BatchConfig::default())
    }

    pub fn with_batch_config(search: S, fetcher: F, config: BatchConfig) -> Self {
        Self {
            search,
            resolver: BatchResolver::new(fetcher, config),
        }
    }

    pub fn resolver(&self) -> &BatchResolver<F> {
        &self.resolver
    }

    /// Fetch one page of records matching `query`
    pub async fn paged_search(
        &self,
        query: &str,
        page_size: usize,
        offset: usize,
    ) -> Result<PagedResult> {
        let request = SearchRequest {
            query: query.to_string(),
            page_size,
            offset,
        };
        self.search_page(&request).await
    }

    /// Fetch the page described by `request`
    pub async fn search_page(&self, request: &SearchRequest) -> Result<PagedResult> {
        request.validate()?;

        let page = self
            .search
            .search(&request.query, request.page_size, request.offset)
            .await?;
        debug!(
            offset = request.offset,
            page_size = request.page_size,
            hits = page.identifiers.len(),
            is_last = page.is_last,
            "Search page received"
        );

        if page.identifiers.is_empty() {
            return Ok(PagedResult {
                records: Vec::new(),
                is_last: page.is_last,
                warnings: Vec::new(),
            });
        }

        let outcome = self.resolver.resolve(&page.identifiers).await?;
        info!(
            offset = request.offset,
            hydrated = outcome.records.len(),
            failed = outcome.warnings.len(),
            is_last = page.is_last,
            "Search page hydrated"
        );

        Ok(PagedResult {
            records: outcome.records,
            is_last: page.is_last,
            warnings: outcome.warnings,
        })
    }
}

/// Run one search page against `search` and hydrate it through `fetcher` at
/// the default concurrency.
pub async fn paged_search<S, F>(
    search: S,
    fetcher: F,
    query: &str,
    page_size: usize,
    offset: usize,
) -> Result<PagedResult>
where
    S: SearchBackend,
    F: RecordFetcher,
{
    SearchCoordinator::new(search, fetcher)
        .paged_search(query, page_size, offset)
        .await
}
