//! Error types for deposit-report
//!
//! This module provides the error handling for the library:
//! - [`FetchError`] for failures reported by (or while talking to) the deposit source
//! - [`ExportError`] for failures of the bulk export loop
//! - [`Error`], the crate-level error that wraps both alongside configuration and I/O failures
//!
//! Every error is recoverable at the level of "the user may retry the action";
//! nothing here is fatal to the process.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for deposit-report operations
pub type Result<T> = std::result::Result<T, Error>;

/// Remote error code that marks an empty result set rather than a failure
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";

/// Message shown to the user when the deposit source gives no message of its own
pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch deposits";

/// Main error type for deposit-report
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "export.max_pages")
        key: Option<String>,
    },

    /// Fetching a page from the deposit source failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The bulk export failed
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error (writing the export artifact)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP client construction or transport error outside a page fetch
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Machine-readable error code, suitable for UI layers that branch on failures
    pub fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Fetch(e) => e.error_code(),
            Error::Export(e) => match e {
                ExportError::InvalidDateRange { .. } => "validation_error",
                ExportError::AlreadyRunning => "export_in_progress",
                ExportError::PageFailed { .. } => "export_page_failed",
                ExportError::PageLimitExceeded { .. } => "export_page_limit",
            },
            Error::Io(_) => "io_error",
            Error::Csv(_) => "csv_error",
            Error::Network(_) => "network_error",
        }
    }
}

/// Errors raised while fetching a single page of deposits
#[derive(Debug, Error)]
pub enum FetchError {
    /// The deposit source answered with a domain error body (`{ code, message? }`)
    #[error("deposit source returned {code}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Remote {
        /// Machine-readable code reported by the source (e.g., "NOT_FOUND")
        code: String,
        /// Optional human-readable message reported by the source
        message: Option<String>,
    },

    /// The source answered with a non-success HTTP status and no error body
    #[error("deposit source returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// A page index below 1 was requested
    #[error("invalid page {page}: pages are numbered from 1")]
    InvalidPage {
        /// The rejected page index
        page: u32,
    },

    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Create a remote error from a code and optional message
    pub fn remote(code: impl Into<String>, message: Option<String>) -> Self {
        FetchError::Remote {
            code: code.into(),
            message,
        }
    }

    /// Create the `NOT_FOUND` remote error
    pub fn not_found() -> Self {
        Self::remote(NOT_FOUND_CODE, None)
    }

    /// Whether this error means "no deposits match" rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Remote { code, .. } if code == NOT_FOUND_CODE)
    }

    /// Message to surface to the user: the source's own message, or the generic fallback
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Remote {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => GENERIC_FETCH_MESSAGE.to_string(),
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &str {
        match self {
            FetchError::Remote { code, .. } => code,
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::InvalidPage { .. } => "invalid_page",
            FetchError::Network(_) => "network_error",
            FetchError::Decode(_) => "decode_error",
        }
    }
}

/// Errors raised by the bulk export
#[derive(Debug, Error)]
pub enum ExportError {
    /// Start date lies after end date; detected before any fetch
    #[error("end date must be after start date ({start} > {end})")]
    InvalidDateRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },

    /// Another export is still running
    #[error("an export is already in progress")]
    AlreadyRunning,

    /// Fetching one of the pages failed; the partial accumulation was discarded
    #[error("failed to fetch page {page}: {source}")]
    PageFailed {
        /// 1-based page that failed
        page: u32,
        /// Underlying fetch failure
        #[source]
        source: FetchError,
    },

    /// The source reported more pages than the configured ceiling
    #[error("export exceeds the limit of {limit} pages")]
    PageLimitExceeded {
        /// Configured page ceiling
        limit: u32,
    },
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_recognised_only_by_code() {
        assert!(FetchError::not_found().is_not_found());
        assert!(FetchError::remote("NOT_FOUND", Some("nothing here".into())).is_not_found());
        assert!(!FetchError::remote("INTERNAL", None).is_not_found());
        assert!(!FetchError::HttpStatus { status: 404 }.is_not_found());
    }

    #[test]
    fn user_message_prefers_remote_message() {
        let err = FetchError::remote("FORBIDDEN", Some("Access denied".into()));
        assert_eq!(err.user_message(), "Access denied");
    }

    #[test]
    fn user_message_falls_back_when_absent_or_empty() {
        assert_eq!(
            FetchError::remote("INTERNAL", None).user_message(),
            GENERIC_FETCH_MESSAGE
        );
        assert_eq!(
            FetchError::remote("INTERNAL", Some(String::new())).user_message(),
            GENERIC_FETCH_MESSAGE
        );
        assert_eq!(
            FetchError::HttpStatus { status: 502 }.user_message(),
            GENERIC_FETCH_MESSAGE
        );
    }

    #[test]
    fn remote_display_includes_optional_message() {
        assert_eq!(
            FetchError::remote("INTERNAL", Some("boom".into())).to_string(),
            "deposit source returned INTERNAL: boom"
        );
        assert_eq!(
            FetchError::remote("INTERNAL", None).to_string(),
            "deposit source returned INTERNAL"
        );
    }

    #[test]
    fn page_failure_names_page_and_cause() {
        let err = ExportError::PageFailed {
            page: 2,
            source: FetchError::remote("TIMEOUT", None),
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch page 2: deposit source returned TIMEOUT"
        );
    }

    #[test]
    fn invalid_date_range_message() {
        let err = ExportError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(err.to_string().starts_with("end date must be after start date"));
    }

    #[test]
    fn error_codes_are_machine_readable() {
        assert_eq!(
            Error::from(ExportError::AlreadyRunning).error_code(),
            "export_in_progress"
        );
        assert_eq!(
            Error::from(FetchError::remote("NOT_FOUND", None)).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            Error::Config {
                message: "bad".into(),
                key: None
            }
            .error_code(),
            "config_error"
        );
    }
}
