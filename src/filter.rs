//! Filter state for the deposit report
//!
//! A [`DepositFilter`] holds the query dimensions (date range, status, free-text
//! search). It is cloned into every fetch so that an in-flight request never
//! observes later edits.

use crate::error::ExportError;
use crate::types::{DepositStatus, PAGE_SIZE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query dimensions of the deposit report
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositFilter {
    /// Earliest transaction date, inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest transaction date, inclusive
    pub end_date: Option<NaiveDate>,
    /// Only deposits with this status
    pub status: Option<DepositStatus>,
    /// Free-text search; empty means "no search"
    pub search_query: String,
}

/// A change to a single filter dimension
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterChange {
    /// Set or clear the start date
    StartDate(Option<NaiveDate>),
    /// Set or clear the end date
    EndDate(Option<NaiveDate>),
    /// Set or clear the status
    Status(Option<DepositStatus>),
    /// Replace the search text
    Search(String),
}

impl DepositFilter {
    /// Apply a change, returning whether the filter actually changed
    pub fn apply(&mut self, change: FilterChange) -> bool {
        match change {
            FilterChange::StartDate(date) => replace_if_changed(&mut self.start_date, date),
            FilterChange::EndDate(date) => replace_if_changed(&mut self.end_date, date),
            FilterChange::Status(status) => replace_if_changed(&mut self.status, status),
            FilterChange::Search(query) => replace_if_changed(&mut self.search_query, query),
        }
    }

    /// Search text to send, `None` when empty
    pub fn search(&self) -> Option<&str> {
        if self.search_query.is_empty() {
            None
        } else {
            Some(&self.search_query)
        }
    }

    /// Reject a range whose start lies after its end
    ///
    /// Open-ended ranges (either side unset) are always valid.
    pub fn validate_date_range(&self) -> Result<(), ExportError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err(ExportError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Build the wire query for one page
    pub fn to_query(&self, page: u32) -> PageQuery {
        PageQuery {
            page,
            page_size: PAGE_SIZE,
            status: self.status,
            start_at: self.start_date,
            end_at: self.end_date,
            search: self.search().map(str::to_string),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Query parameters sent to the deposit source for one page
///
/// Unset optionals are omitted from the query string entirely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page index
    pub page: u32,
    /// Deposits per page (always [`PAGE_SIZE`])
    pub page_size: u32,
    /// Status filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DepositStatus>,
    /// Start date (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<NaiveDate>,
    /// End date (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<NaiveDate>,
    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
