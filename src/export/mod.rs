//! Bulk export of every deposit matching a filter
//!
//! The source serves at most [`PAGE_SIZE`](crate::types::PAGE_SIZE) deposits per
//! request, so [`ExportAggregator`] walks the pages in ascending order, one
//! request at a time, and concatenates them before handing the whole sequence to
//! an [`ArtifactWriter`]. Any page failure aborts the export; nothing is written
//! from a partial accumulation.
//!
//! - [`columns`] - the fixed column mapping
//! - [`ArtifactWriter`] - the output seam
//! - [`CsvArtifactWriter`] - CSV file output

pub mod columns;
mod csv_writer;
mod writer;

pub use columns::ExportColumn;
pub use csv_writer::{CsvArtifactWriter, render_csv};
pub use writer::ArtifactWriter;

use crate::error::{Error, ExportError, Result};
use crate::fetcher::PageFetcher;
use crate::filter::DepositFilter;
use crate::types::{Event, ExportSummary, ReportedDeposit};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Holds the "export running" flag for the lifetime of one export
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives the page fetcher over every page of a filter and writes the result
#[derive(Clone)]
pub struct ExportAggregator {
    fetcher: PageFetcher,
    writer: Arc<dyn ArtifactWriter>,
    /// Ceiling on pages per export
    max_pages: u32,
    /// Set while an export is running; at most one export at a time
    running: Arc<AtomicBool>,
    event_tx: broadcast::Sender<Event>,
}

impl ExportAggregator {
    /// Create an aggregator
    ///
    /// `max_pages` is clamped to at least 1.
    pub fn new(
        fetcher: PageFetcher,
        writer: Arc<dyn ArtifactWriter>,
        max_pages: u32,
        event_tx: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            fetcher,
            writer,
            max_pages: max_pages.max(1),
            running: Arc::new(AtomicBool::new(false)),
            event_tx,
        }
    }

    /// Whether an export is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Export every deposit matching `filter`
    ///
    /// 1. Rejects `start_date > end_date` before any fetch
    /// 2. Rejects the call if another export is running
    /// 3. Fetches pages 1..=total_pages in order, appending each page's records
    /// 4. Writes the accumulated records with the fixed column mapping
    ///
    /// # Errors
    ///
    /// - `ExportError::InvalidDateRange` for an inverted date range
    /// - `ExportError::AlreadyRunning` while another export runs
    /// - `ExportError::PageFailed` naming the first page that failed
    /// - `ExportError::PageLimitExceeded` as soon as the source reports more pages than allowed
    /// - I/O or CSV errors from the artifact writer
    pub async fn export_all(&self, filter: &DepositFilter) -> Result<ExportSummary> {
        let result = self.run(filter).await;
        match &result {
            Ok(summary) => {
                info!(
                    records = summary.records,
                    pages = summary.pages,
                    path = %summary.path.display(),
                    writer = self.writer.name(),
                    "Deposit export complete"
                );
                self.emit(Event::ExportComplete {
                    records: summary.records,
                    path: summary.path.clone(),
                });
            }
            // No event: the running export is unaffected
            Err(Error::Export(ExportError::AlreadyRunning)) => {
                debug!("Deposit export rejected, another export is running");
            }
            Err(e) => {
                warn!(error = %e, "Deposit export failed");
                self.emit(Event::ExportFailed {
                    error: e.to_string(),
                });
            }
        }
        result
    }

    /// Fetch and concatenate every page for `filter`, without writing an artifact
    ///
    /// Records come back in page order, then in-page order. Validation and the
    /// one-export-at-a-time rule apply as for [`export_all`](Self::export_all).
    /// Progress events are emitted; start and completion events are not.
    ///
    /// # Errors
    ///
    /// Same as [`export_all`](Self::export_all), minus artifact writer failures.
    pub async fn collect_all(
        &self,
        filter: &DepositFilter,
    ) -> std::result::Result<Vec<ReportedDeposit>, ExportError> {
        filter.validate_date_range()?;
        let _guard = RunningGuard::acquire(&self.running).ok_or(ExportError::AlreadyRunning)?;
        let (records, _) = self.collect(filter).await?;
        Ok(records)
    }

    async fn run(&self, filter: &DepositFilter) -> Result<ExportSummary> {
        filter.validate_date_range()?;

        let _guard = RunningGuard::acquire(&self.running).ok_or(ExportError::AlreadyRunning)?;
        self.emit(Event::ExportStarted);

        let (records, pages) = self.collect(filter).await?;
        let path = self.writer.write(&records, &ExportColumn::ALL).await?;

        Ok(ExportSummary {
            records: records.len(),
            pages,
            path,
        })
    }

    async fn collect(
        &self,
        filter: &DepositFilter,
    ) -> std::result::Result<(Vec<ReportedDeposit>, u32), ExportError> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .fetcher
                .fetch_page(filter, page)
                .await
                .map_err(|source| ExportError::PageFailed { page, source })?;

            let total_pages = response.total_pages;
            if total_pages > self.max_pages {
                warn!(
                    page,
                    total_pages,
                    limit = self.max_pages,
                    "Deposit source reports more pages than the export limit"
                );
                return Err(ExportError::PageLimitExceeded {
                    limit: self.max_pages,
                });
            }
            records.extend(response.data);

            debug!(page, total_pages, records = records.len(), "Export page appended");
            self.emit(Event::ExportProgress {
                page,
                total_pages,
                records: records.len(),
            });

            if page >= total_pages {
                return Ok((records, page));
            }
            page += 1;
        }
    }

    fn emit(&self, event: Event) {
        // send() fails only when nobody is subscribed
        self.event_tx.send(event).ok();
    }
}
