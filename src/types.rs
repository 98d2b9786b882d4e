//! Core types for deposit-report

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed number of deposits per page requested from the source
pub const PAGE_SIZE: u32 = 10;

/// Deposit status as reported by the source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    /// Payment received
    Paid,
    /// Payment window elapsed without payment
    Expired,
    /// Awaiting payment
    Pending,
    /// Cancelled before payment
    Canceled,
}

impl DepositStatus {
    /// Wire representation, as used in query strings and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Paid => "paid",
            DepositStatus::Expired => "expired",
            DepositStatus::Pending => "pending",
            DepositStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DepositStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(DepositStatus::Paid),
            "expired" => Ok(DepositStatus::Expired),
            "pending" => Ok(DepositStatus::Pending),
            "canceled" => Ok(DepositStatus::Canceled),
            other => Err(format!("unknown deposit status: {}", other)),
        }
    }
}

/// One deposit transaction as reported by the source
///
/// Immutable snapshot; the crate never edits records, it only moves them
/// between the visible page, the export accumulator and the artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedDeposit {
    /// Transaction identifier
    pub transaction_id: String,
    /// Payer phone number
    pub phone: String,
    /// Destination wallet address
    #[serde(rename = "coldWallet")]
    pub wallet: String,
    /// Blockchain network selected for the payout
    pub network: String,
    /// Payment method (e.g., "pix")
    pub payment_method: String,
    /// Payer document identifier (CPF/CNPJ)
    pub document_id: String,
    /// Transaction timestamp, as formatted by the source
    pub transaction_date: String,
    /// Coupon code applied to the deposit
    #[serde(default)]
    pub coupon: Option<String>,
    /// Value in the source asset
    #[serde(rename = "valueBTC")]
    pub value_in_asset: f64,
    /// Value in local currency
    #[serde(rename = "valueBRL")]
    pub value_in_local_currency: f64,
    /// Deposit status
    pub status: DepositStatus,
    /// Discount percentage (10.0 means 10%)
    #[serde(rename = "discountValue")]
    pub discount_percent: f64,
    /// Collected (settled) value
    pub value_collected: f64,
}

/// One page of deposits as returned by the source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// Deposits on this page, in source order
    #[serde(default)]
    pub data: Vec<ReportedDeposit>,
    /// Total number of pages for the filter (absent or 0 is read as 1)
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

impl PageResponse {
    /// Build a page response
    pub fn new(data: Vec<ReportedDeposit>, total_pages: u32) -> Self {
        Self { data, total_pages }.normalized()
    }

    /// Clamp `total_pages` to at least 1
    pub fn normalized(mut self) -> Self {
        self.total_pages = self.total_pages.max(1);
        self
    }
}

fn default_total_pages() -> u32 {
    1
}

/// Load state of the visible page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded (possibly with an empty result)
    Loaded,
    /// The last fetch failed
    Errored {
        /// User-facing message
        message: String,
    },
}

impl LoadState {
    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Outcome of a successful export
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Number of deposits written
    pub records: usize,
    /// Number of pages fetched
    pub pages: u32,
    /// Where the artifact was written
    pub path: PathBuf,
}

/// Event emitted by the report coordinator
///
/// UI layers subscribe with [`DepositReport::subscribe`](crate::DepositReport::subscribe)
/// and render alerts, spinners and progress from these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A visible-page fetch started
    PageLoading {
        /// Requested page
        page: u32,
        /// Request generation
        generation: u64,
    },

    /// The visible page was replaced with fresh results
    PageLoaded {
        /// Loaded page
        page: u32,
        /// Total pages reported by the source
        total_pages: u32,
        /// Number of deposits on the page
        records: usize,
    },

    /// The source reported no matching deposits; the visible page was cleared
    PageEmpty {
        /// Requested page
        page: u32,
    },

    /// A failure the user should see
    Alert {
        /// User-facing message
        message: String,
    },

    /// A response arrived after a newer request was issued and was dropped
    StaleResponseDiscarded {
        /// Generation of the dropped response
        generation: u64,
        /// Latest issued generation
        latest: u64,
    },

    /// A bulk export started
    ExportStarted,

    /// A page was appended to the export accumulator
    ExportProgress {
        /// Page just fetched
        page: u32,
        /// Total pages reported by the source
        total_pages: u32,
        /// Deposits accumulated so far
        records: usize,
    },

    /// The export artifact was written
    ExportComplete {
        /// Deposits written
        records: usize,
        /// Artifact path
        path: PathBuf,
    },

    /// The export failed; no artifact was produced
    ExportFailed {
        /// Error message
        error: String,
    },
}
