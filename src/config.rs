//! Configuration types for deposit-report

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Remote deposit source settings
///
/// Used as a nested sub-config within [`ReportConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the report API (default: "http://localhost:3000/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the paginated deposit report endpoint, relative to `base_url`
    /// (default: "report/deposit/paginated")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Bulk export settings
///
/// Used as a nested sub-config within [`ReportConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the export artifact is written to (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fixed artifact file name (default: "deposits.csv")
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Hard ceiling on the number of pages a single export may fetch (default: 1000)
    ///
    /// Protects against a source that keeps reporting more pages than it has.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_name: default_file_name(),
            max_pages: default_max_pages(),
        }
    }
}

/// Main configuration for [`DepositReport`](crate::DepositReport)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Remote deposit source
    #[serde(default)]
    pub source: SourceConfig,

    /// Bulk export
    #[serde(default)]
    pub export: ExportConfig,

    /// Buffer size of the event broadcast channel (default: 100)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            export: ExportConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl ReportConfig {
    /// Check the configuration for values that can never work
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = url::Url::parse(&self.source.base_url) {
            return Err(config_error(
                format!("invalid base_url '{}': {}", self.source.base_url, e),
                "source.base_url",
            ));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(config_error(
                "export file name must not be empty",
                "export.file_name",
            ));
        }
        if self.export.max_pages == 0 {
            return Err(config_error(
                "max_pages must be at least 1",
                "export.max_pages",
            ));
        }
        if self.event_capacity == 0 {
            return Err(config_error(
                "event_capacity must be at least 1",
                "event_capacity",
            ));
        }
        Ok(())
    }

    /// Full path of the export artifact
    pub fn export_path(&self) -> PathBuf {
        self.export.output_dir.join(&self.export.file_name)
    }
}

fn config_error(message: impl Into<String>, key: &str) -> Error {
    Error::Config {
        message: message.into(),
        key: Some(key.to_string()),
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_endpoint() -> String {
    "report/deposit/paginated".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("deposit-report/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_name() -> String {
    "deposits.csv".to_string()
}

fn default_max_pages() -> u32 {
    1000
}

fn default_event_capacity() -> usize {
    100
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
