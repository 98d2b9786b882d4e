//! # deposit-report
//!
//! Backend library for a paginated, filterable deposit report with bulk export.
//!
//! ## Design Philosophy
//!
//! deposit-report is designed to be:
//! - **Library-first** - No UI, a Rust crate a dashboard or CLI embeds
//! - **Sensible defaults** - Works against a local API with zero configuration
//! - **Event-driven** - Consumers subscribe to events for alerts and export progress
//! - **Pluggable** - The remote source and the export artifact sit behind traits
//!
//! ## Quick Start
//!
//! ```no_run
//! use deposit_report::{DepositReport, DepositStatus, ReportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = ReportConfig::default();
//!     config.source.base_url = "https://api.example.com/".to_string();
//!
//!     let report = DepositReport::from_config(&config)?;
//!
//!     // Subscribe to events
//!     let mut events = report.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     report.set_status(Some(DepositStatus::Paid)).await;
//!     report.next_page().await;
//!
//!     let summary = report.export_all().await?;
//!     println!("Exported {} deposits to {}", summary.records, summary.path.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bulk export and artifact writers
pub mod export;
/// Single-page fetching
pub mod fetcher;
/// Filter state and query building
pub mod filter;
/// Page navigation state
pub mod pagination;
/// Report coordinator
pub mod report;
/// Remote deposit sources
pub mod source;
/// Core types and events
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::{ExportConfig, ReportConfig, SourceConfig};
pub use error::{Error, ExportError, FetchError, Result};
pub use export::{ArtifactWriter, CsvArtifactWriter, ExportAggregator, ExportColumn};
pub use filter::{DepositFilter, FilterChange};
pub use report::{DepositReport, ReportView};
pub use source::{DepositSource, HttpDepositSource};
pub use types::{
    DepositStatus, Event, ExportSummary, LoadState, PAGE_SIZE, PageResponse, ReportedDeposit,
};
