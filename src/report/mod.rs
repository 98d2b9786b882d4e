//! The deposit report coordinator
//!
//! [`DepositReport`] owns the filter, the pagination and the visible page, and
//! ties them to the page fetcher and the export aggregator:
//!
//! - every filter change resets pagination to page 1 and refetches the visible page
//! - accepted page navigation refetches the visible page
//! - responses to superseded requests are dropped (generation token)
//! - exports run on a snapshot of the filter and never touch the visible page

use crate::config::ReportConfig;
use crate::error::Result;
use crate::export::{ArtifactWriter, CsvArtifactWriter, ExportAggregator};
use crate::fetcher::{PageFetcher, PageOutcome};
use crate::filter::{DepositFilter, FilterChange};
use crate::pagination::Pagination;
use crate::source::{DepositSource, HttpDepositSource};
use crate::types::{DepositStatus, Event, ExportSummary, LoadState, ReportedDeposit};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info};

/// Mutable state shared by all clones of a [`DepositReport`]
#[derive(Debug, Default)]
struct ReportState {
    filter: DepositFilter,
    pagination: Pagination,
    /// Deposits of the visible page
    deposits: Vec<ReportedDeposit>,
    load_state: LoadState,
    /// Generation of the most recently issued visible-page request
    latest_generation: u64,
}

/// Consistent snapshot of everything a UI needs to render the report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportView {
    /// Current filter
    pub filter: DepositFilter,
    /// Current 1-based page
    pub current_page: u32,
    /// Total pages (1 when unknown)
    pub total_pages: u32,
    /// Deposits of the visible page
    pub deposits: Vec<ReportedDeposit>,
    /// Load state of the visible page
    pub load_state: LoadState,
    /// Whether an export is running
    pub exporting: bool,
}

/// Paginated, filterable view over the deposit report, with bulk export
///
/// Cloneable; all clones share the same state.
#[derive(Clone)]
pub struct DepositReport {
    fetcher: PageFetcher,
    exporter: ExportAggregator,
    state: Arc<Mutex<ReportState>>,
    event_tx: broadcast::Sender<Event>,
}

impl DepositReport {
    /// Create a report over an arbitrary source and artifact writer
    pub fn new(
        source: Arc<dyn DepositSource>,
        writer: Arc<dyn ArtifactWriter>,
        config: &ReportConfig,
    ) -> Self {
        let (event_tx, _rx) = broadcast::channel(config.event_capacity.max(1));
        let fetcher = PageFetcher::new(source);
        let exporter = ExportAggregator::new(
            fetcher.clone(),
            writer,
            config.export.max_pages,
            event_tx.clone(),
        );

        Self {
            fetcher,
            exporter,
            state: Arc::new(Mutex::new(ReportState::default())),
            event_tx,
        }
    }

    /// Create a report talking HTTP to the configured API and exporting CSV
    ///
    /// No request is made until the first [`refresh`](Self::refresh) or filter change.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for invalid configuration and `Error::Network` if
    /// the HTTP client cannot be built.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        config.validate()?;
        let source = Arc::new(HttpDepositSource::new(&config.source)?);
        let writer = Arc::new(CsvArtifactWriter::from_config(&config.export));
        info!(
            endpoint = %source.endpoint(),
            export_path = %writer.path().display(),
            "Deposit report configured"
        );
        Ok(Self::new(source, writer, config))
    }

    /// Subscribe to report events
    ///
    /// Each subscriber receives every event emitted after subscribing.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: Event) {
        // send() fails only when nobody is subscribed
        self.event_tx.send(event).ok();
    }

    /// Change one filter dimension
    ///
    /// When the value actually changes, pagination goes back to page 1 and the
    /// visible page is refetched. Setting a dimension to its current value does
    /// nothing. Returns the resulting load state.
    pub async fn set_filter(&self, change: FilterChange) -> LoadState {
        {
            let mut state = self.state.lock().await;
            if !state.filter.apply(change) {
                return state.load_state.clone();
            }
            state.pagination.reset();
            debug!(filter = ?state.filter, "Deposit filter changed");
        }
        self.refresh().await
    }

    /// Set or clear the start date
    pub async fn set_start_date(&self, date: Option<NaiveDate>) -> LoadState {
        self.set_filter(FilterChange::StartDate(date)).await
    }

    /// Set or clear the end date
    pub async fn set_end_date(&self, date: Option<NaiveDate>) -> LoadState {
        self.set_filter(FilterChange::EndDate(date)).await
    }

    /// Set or clear the status filter
    pub async fn set_status(&self, status: Option<DepositStatus>) -> LoadState {
        self.set_filter(FilterChange::Status(status)).await
    }

    /// Replace the search text; an empty string clears the search
    pub async fn set_search_query(&self, query: impl Into<String>) -> LoadState {
        self.set_filter(FilterChange::Search(query.into())).await
    }

    /// Navigate to page `page`
    ///
    /// Pages outside `1..=total_pages` are ignored without error, as is the
    /// current page. Otherwise the page is fetched. Returns the resulting load state.
    pub async fn go_to_page(&self, page: u32) -> LoadState {
        {
            let mut state = self.state.lock().await;
            if !state.pagination.go_to_page(page) {
                debug!(
                    page,
                    total_pages = state.pagination.total_pages(),
                    "Ignoring page navigation"
                );
                return state.load_state.clone();
            }
        }
        self.refresh().await
    }

    /// Navigate to the next page, if any
    pub async fn next_page(&self) -> LoadState {
        let page = self.state.lock().await.pagination.current_page().saturating_add(1);
        self.go_to_page(page).await
    }

    /// Navigate to the previous page, if any
    pub async fn previous_page(&self) -> LoadState {
        let page = self.state.lock().await.pagination.current_page().saturating_sub(1);
        self.go_to_page(page).await
    }

    /// Fetch the current page for the current filter
    ///
    /// Each call takes a new generation number. If another refresh is issued
    /// while this one is in flight, this response is discarded when it arrives
    /// and the newer request decides the visible state.
    pub async fn refresh(&self) -> LoadState {
        let (generation, filter, page) = {
            let mut state = self.state.lock().await;
            state.latest_generation += 1;
            state.load_state = LoadState::Loading;
            (
                state.latest_generation,
                state.filter.clone(),
                state.pagination.current_page(),
            )
        };
        self.emit(Event::PageLoading { page, generation });

        let outcome = self.fetcher.fetch_visible(&filter, page).await;

        let mut state = self.state.lock().await;
        if generation != state.latest_generation {
            debug!(
                generation,
                latest = state.latest_generation,
                "Discarding stale deposit page"
            );
            self.emit(Event::StaleResponseDiscarded {
                generation,
                latest: state.latest_generation,
            });
            return state.load_state.clone();
        }

        match outcome {
            PageOutcome::Loaded(response) => {
                state.pagination.set_total_pages(response.total_pages);
                state.deposits = response.data;
                state.load_state = LoadState::Loaded;
                self.emit(Event::PageLoaded {
                    page,
                    total_pages: state.pagination.total_pages(),
                    records: state.deposits.len(),
                });
            }
            PageOutcome::Empty => {
                // total_pages keeps the value of the last successful fetch
                state.deposits.clear();
                state.load_state = LoadState::Loaded;
                self.emit(Event::PageEmpty { page });
            }
            PageOutcome::Failed(e) => {
                let message = e.user_message();
                state.load_state = LoadState::Errored {
                    message: message.clone(),
                };
                self.emit(Event::Alert { message });
            }
        }
        state.load_state.clone()
    }

    /// Export every deposit matching the current filter
    ///
    /// The filter is snapshotted when the call starts; later filter changes do
    /// not affect a running export, and the export never changes the visible page.
    ///
    /// # Errors
    ///
    /// See [`ExportAggregator::export_all`].
    pub async fn export_all(&self) -> Result<ExportSummary> {
        let filter = self.filter().await;
        self.exporter.export_all(&filter).await
    }

    /// Whether an export is running
    pub fn is_exporting(&self) -> bool {
        self.exporter.is_running()
    }

    /// Current filter
    pub async fn filter(&self) -> DepositFilter {
        self.state.lock().await.filter.clone()
    }

    /// Deposits of the visible page
    pub async fn deposits(&self) -> Vec<ReportedDeposit> {
        self.state.lock().await.deposits.clone()
    }

    /// Current 1-based page
    pub async fn current_page(&self) -> u32 {
        self.state.lock().await.pagination.current_page()
    }

    /// Total pages reported by the last successful fetch (1 when unknown)
    pub async fn total_pages(&self) -> u32 {
        self.state.lock().await.pagination.total_pages()
    }

    /// Load state of the visible page
    pub async fn load_state(&self) -> LoadState {
        self.state.lock().await.load_state.clone()
    }

    /// Consistent snapshot of the whole report
    pub async fn view(&self) -> ReportView {
        let state = self.state.lock().await;
        ReportView {
            filter: state.filter.clone(),
            current_page: state.pagination.current_page(),
            total_pages: state.pagination.total_pages(),
            deposits: state.deposits.clone(),
            load_state: state.load_state.clone(),
            exporting: self.exporter.is_running(),
        }
    }
}
