//! Page/limit/total bookkeeping for the paginated list
//!
//! All operations are pure state transitions. Out-of-range input is
//! clamped or ignored, never reported.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total: u64,
    min_limit: u32,
    max_limit: u32,
}

impl Pagination {
    /// Start at `page` with `limit` bounded by the configured page sizes.
    pub fn new(page: u32, limit: u32, config: &PaginationConfig) -> Self {
        Self {
            page: page.max(1),
            limit: config.clamp_limit(limit).max(1),
            total: 0,
            min_limit: config.min_limit.max(1),
            max_limit: config.max_limit.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    /// Move to `page` if it exists. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages() || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn go_to_next(&mut self) -> bool {
        self.can_go_next() && self.go_to_page(self.page + 1)
    }

    pub fn go_to_prev(&mut self) -> bool {
        self.can_go_prev() && self.go_to_page(self.page - 1)
    }

    /// Record a new total. A page past the end snaps back to the first page.
    /// Returns whether the page changed.
    pub fn update_total(&mut self, total: u64) -> bool {
        self.total = total;
        let pages = self.total_pages();
        if self.page > pages.max(1) {
            self.page = 1;
            return true;
        }
        false
    }

    /// Change the page size, keeping the first visible item on screen.
    /// Returns whether page or limit changed.
    pub fn set_limit(&mut self, limit: u32) -> bool {
        let limit = limit.clamp(self.min_limit, self.max_limit).max(1);
        if limit == self.limit {
            return false;
        }
        let first_item = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        let page = first_item.div_ceil(u64::from(limit)).max(1);
        self.limit = limit;
        self.page = u32::try_from(page)
            .unwrap_or(u32::MAX)
            .min(self.total_pages().max(1));
        true
    }

    /// 1-based inclusive range of the items on the current page.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let start = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        let end = (u64::from(self.page) * u64::from(self.limit)).min(self.total);
        Some((start.min(end), end))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        let config = PaginationConfig::default();
        Self::new(1, config.default_limit, &config)
    }
}

pub fn total_pages(total: u64, limit: u32) -> u32 {
    let pages = total.div_ceil(u64::from(limit.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
