//! The artifact writer trait

use super::columns::ExportColumn;
use crate::types::ReportedDeposit;
use async_trait::async_trait;
use std::path::PathBuf;

/// Turns an ordered sequence of deposits into a downloadable tabular file
///
/// Implementations write one header row of column labels followed by one row
/// per record, preserving record order, to a deterministic location.
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    /// Write the artifact and return where it was written
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be serialized or stored.
    async fn write(
        &self,
        records: &[ReportedDeposit],
        columns: &[ExportColumn],
    ) -> crate::Result<PathBuf>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
