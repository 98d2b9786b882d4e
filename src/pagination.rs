//! Pagination bookkeeping for the visible page

use serde::{Deserialize, Serialize};

/// Current page and total page count of the visible report
///
/// `current_page` is always within `1..=total_pages`, except transiently after
/// a filter change shrinks the result set; the next fetch response fixes that up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Current 1-based page
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the last successful fetch (1 when unknown)
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Back to page 1; called whenever a filter dimension changes
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to page `page` if it is within `1..=total_pages`
    ///
    /// Out-of-range requests are ignored, like a disabled navigation button.
    /// Returns whether the current page changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Record the total page count of a fetch response; 0 is read as 1
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
    }

    /// Whether a later page exists
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether an earlier page exists
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}
