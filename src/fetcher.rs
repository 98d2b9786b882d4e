//! Page fetching on top of a [`DepositSource`]
//!
//! [`PageFetcher`] turns a filter snapshot and a page index into one remote
//! call with the fixed page size, and classifies the result for the visible
//! page: `NOT_FOUND` is an empty result set, anything else is a failure the
//! user should see.

use crate::error::FetchError;
use crate::filter::DepositFilter;
use crate::source::DepositSource;
use crate::types::PageResponse;
use std::sync::Arc;
use tracing::{debug, warn};

/// Classified result of a visible-page fetch
#[derive(Debug)]
pub enum PageOutcome {
    /// Deposits for the page plus the total page count
    Loaded(PageResponse),
    /// The source reported `NOT_FOUND`; show an empty list without alerting
    Empty,
    /// Any other failure; alert with [`FetchError::user_message`]
    Failed(FetchError),
}

impl From<Result<PageResponse, FetchError>> for PageOutcome {
    fn from(result: Result<PageResponse, FetchError>) -> Self {
        match result {
            Ok(page) => PageOutcome::Loaded(page),
            Err(e) if e.is_not_found() => PageOutcome::Empty,
            Err(e) => PageOutcome::Failed(e),
        }
    }
}

/// Fetches single pages of deposits for a filter
#[derive(Clone)]
pub struct PageFetcher {
    source: Arc<dyn DepositSource>,
}

impl PageFetcher {
    /// Wrap a deposit source
    pub fn new(source: Arc<dyn DepositSource>) -> Self {
        Self { source }
    }

    /// Fetch page `page` (1-based) for `filter`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidPage` for page 0 without calling the source,
    /// otherwise whatever the source reports.
    pub async fn fetch_page(
        &self,
        filter: &DepositFilter,
        page: u32,
    ) -> Result<PageResponse, FetchError> {
        if page < 1 {
            return Err(FetchError::InvalidPage { page });
        }

        let query = filter.to_query(page);
        let response = self.source.fetch(&query).await?.normalized();

        debug!(
            source = self.source.name(),
            page,
            records = response.data.len(),
            total_pages = response.total_pages,
            "Fetched deposit page"
        );
        Ok(response)
    }

    /// Fetch a page for display and classify the result
    pub async fn fetch_visible(&self, filter: &DepositFilter, page: u32) -> PageOutcome {
        let outcome = PageOutcome::from(self.fetch_page(filter, page).await);
        match &outcome {
            PageOutcome::Empty => debug!(page, "No deposits match the current filter"),
            PageOutcome::Failed(e) => warn!(page, error = %e, "Failed to fetch deposit page"),
            PageOutcome::Loaded(_) => {}
        }
        outcome
    }
}
