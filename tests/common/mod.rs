//! Common test utilities for deposit-report integration tests

#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

use deposit_report::{DepositReport, ReportConfig};
use std::path::Path;
use wiremock::MockServer;

/// Path of the paginated deposit endpoint under the mock server
pub const ENDPOINT: &str = "/report/deposit/paginated";

/// Report talking to `server` and exporting into `dir`
#[allow(dead_code)]
pub fn report_for(server: &MockServer, dir: &Path) -> DepositReport {
    let mut config = ReportConfig::default();
    config.source.base_url = server.uri();
    config.export.output_dir = dir.to_path_buf();
    DepositReport::from_config(&config).expect("valid test config")
}
