//! CSV artifact writer

use super::columns::{ExportColumn, header, render_row};
use super::writer::ArtifactWriter;
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::types::ReportedDeposit;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Render deposits as CSV bytes: a header row, then one row per deposit
pub fn render_csv(records: &[ReportedDeposit], columns: &[ExportColumn]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(header(columns))?;
    for record in records {
        wtr.write_record(render_row(record, columns))?;
    }
    wtr.into_inner()
        .map_err(|e| Error::Io(std::io::Error::new(e.error().kind(), e.to_string())))
}

/// Writes the export as a CSV file at a fixed path
///
/// Every export overwrites the same file, `<output_dir>/<file_name>`.
#[derive(Clone, Debug)]
pub struct CsvArtifactWriter {
    path: PathBuf,
}

impl CsvArtifactWriter {
    /// Writer for an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writer for the configured output directory and file name
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.output_dir.join(&config.file_name))
    }

    /// Where the artifact is written
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ArtifactWriter for CsvArtifactWriter {
    async fn write(
        &self,
        records: &[ReportedDeposit],
        columns: &[ExportColumn],
    ) -> Result<PathBuf> {
        let bytes = render_csv(records, columns)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create export directory '{}': {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        tokio::fs::write(&self.path, &bytes).await?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            bytes = bytes.len(),
            "Wrote CSV export"
        );
        Ok(self.path.clone())
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{deposit, deposits};
    use tempfile::tempdir;

    #[test]
    fn renders_header_then_rows_in_order() {
        let records = deposits("tx", 3);
        let csv = String::from_utf8(render_csv(&records, &ExportColumn::ALL).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Transaction ID,Phone,Wallet,Selected Network"));
        assert!(lines[0].ends_with("Status,Discount,Collected Value"));
        assert!(lines[1].starts_with("tx-0,"));
        assert!(lines[2].starts_with("tx-1,"));
        assert!(lines[3].starts_with("tx-2,"));
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let mut record = deposit("tx-1");
        record.coupon = Some("A,B".into());
        let csv = String::from_utf8(
            render_csv(&[record], &[ExportColumn::TransactionId, ExportColumn::Coupon]).unwrap(),
        )
        .unwrap();
        assert_eq!(csv, "Transaction ID,Coupon\ntx-1,\"A,B\"\n");
    }

    #[test]
    fn empty_export_has_only_header() {
        let csv = String::from_utf8(render_csv(&[], &ExportColumn::ALL).unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[tokio::test]
    async fn writes_file_creating_missing_directory() {
        let dir = tempdir().unwrap();
        let config = ExportConfig {
            output_dir: dir.path().join("exports"),
            file_name: "deposits.csv".into(),
            ..Default::default()
        };
        let writer = CsvArtifactWriter::from_config(&config);

        let path = writer
            .write(&deposits("tx", 2), &ExportColumn::ALL)
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("exports").join("deposits.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn unwritable_location_is_an_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let writer = CsvArtifactWriter::new(blocker.join("deposits.csv"));

        let err = writer
            .write(&deposits("tx", 1), &ExportColumn::ALL)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.error_code(), "io_error");
    }

    #[tokio::test]
    async fn rewrites_same_file_on_every_export() {
        let dir = tempdir().unwrap();
        let writer = CsvArtifactWriter::new(dir.path().join("deposits.csv"));

        writer.write(&deposits("a", 5), &ExportColumn::ALL).await.unwrap();
        let path = writer.write(&deposits("b", 1), &ExportColumn::ALL).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("b-0"));
        assert!(!content.contains("a-0"));
    }
}
