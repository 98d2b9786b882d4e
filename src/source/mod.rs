//! Remote deposit sources
//!
//! The core abstraction is the [`DepositSource`] trait: given a page query, return
//! one page of deposits or a classified [`FetchError`](crate::error::FetchError).
//!
//! - [`HttpDepositSource`]: talks to the report API over HTTP
//!
//! ## Usage
//!
//! ```no_run
//! use deposit_report::config::SourceConfig;
//! use deposit_report::filter::DepositFilter;
//! use deposit_report::source::{DepositSource, HttpDepositSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpDepositSource::new(&SourceConfig::default())?;
//!     let page = source.fetch(&DepositFilter::default().to_query(1)).await?;
//!     println!("{} deposits, {} pages", page.data.len(), page.total_pages);
//!     Ok(())
//! }
//! ```

mod http;
mod traits;

pub use http::HttpDepositSource;
pub use traits::DepositSource;
