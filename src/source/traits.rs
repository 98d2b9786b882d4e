//! The deposit source trait

use crate::error::FetchError;
use crate::filter::PageQuery;
use crate::types::PageResponse;
use async_trait::async_trait;

/// A remote collection of deposits that can be read one page at a time
///
/// Implementations perform exactly one remote call per `fetch` and never retry.
/// Domain errors reported by the remote side must be returned as
/// [`FetchError::Remote`] so that `NOT_FOUND` can be told apart from failures.
#[async_trait]
pub trait DepositSource: Send + Sync {
    /// Fetch one page of deposits
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source reports a domain error (`{ code, message? }`)
    /// - The request cannot be sent or times out
    /// - The response body cannot be decoded
    async fn fetch(&self, query: &PageQuery) -> Result<PageResponse, FetchError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
