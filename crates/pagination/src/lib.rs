//! Page-size policy and "Showing X-Y of Z" arithmetic.
//!
//! Both the catalog executor and the client consume these helpers so the
//! numbers shown to a reader never drift from what the server returned.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Page size requested by a caller. A raw value of `0` means "return every match".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLimit {
    Unlimited,
    PerPage(NonZeroU64),
}

impl PageLimit {
    /// Interpret a parsed integer limit. Non-positive values disable paging.
    pub fn from_raw(raw: i64) -> Self {
        u64::try_from(raw)
            .ok()
            .and_then(NonZeroU64::new)
            .map_or(Self::Unlimited, Self::PerPage)
    }

    /// Raw wire value, `0` for unlimited.
    pub const fn get(self) -> u64 {
        match self {
            Self::Unlimited => 0,
            Self::PerPage(n) => n.get(),
        }
    }

    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl From<u64> for PageLimit {
    fn from(raw: u64) -> Self {
        NonZeroU64::new(raw).map_or(Self::Unlimited, Self::PerPage)
    }
}

/// `ceil(total / limit)` for a bounded limit, `1` otherwise.
pub fn total_pages(total_count: u64, limit: PageLimit) -> u64 {
    match limit {
        PageLimit::Unlimited => 1,
        PageLimit::PerPage(n) => total_count.div_ceil(n.get()),
    }
}

/// Number of documents to skip before the requested page starts.
pub fn skip(current_page: u64, limit: PageLimit) -> u64 {
    match limit {
        PageLimit::Unlimited => 0,
        PageLimit::PerPage(n) => current_page.saturating_sub(1).saturating_mul(n.get()),
    }
}

/// Pagination metadata carried alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_count: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(total_count: u64, limit: PageLimit, current_page: u64) -> Self {
        Self {
            total_count,
            current_page,
            total_pages: total_pages(total_count, limit),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total_count: 0,
            current_page: 1,
            total_pages: 1,
        }
    }
}

/// Human-facing view of one page: which ordinal range of the result set it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub total_count: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub display_start: u64,
    pub display_end: u64,
}

impl PageWindow {
    pub fn compute(total_count: u64, limit: PageLimit, current_page: u64) -> Self {
        let effective_limit = match limit {
            PageLimit::Unlimited => total_count,
            PageLimit::PerPage(n) => n.get(),
        };

        let (display_start, display_end) = if total_count == 0 {
            (0, 0)
        } else {
            let start = current_page
                .saturating_sub(1)
                .saturating_mul(effective_limit)
                .saturating_add(1);
            let end = current_page
                .saturating_mul(effective_limit)
                .min(total_count);
            (start, end)
        };

        Self {
            total_count,
            current_page,
            total_pages: total_pages(total_count, limit),
            display_start,
            display_end,
        }
    }

    /// Build the window for metadata the server already computed.
    pub fn from_pagination(pagination: &Pagination, limit: PageLimit) -> Self {
        Self::compute(pagination.total_count, limit, pagination.current_page)
    }

    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {}-{} of {}",
            self.display_start, self.display_end, self.total_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_page(n: u64) -> PageLimit {
        PageLimit::from(n)
    }

    #[test]
    fn raw_zero_and_negative_limits_are_unlimited() {
        assert_eq!(PageLimit::from_raw(0), PageLimit::Unlimited);
        assert_eq!(PageLimit::from_raw(-4), PageLimit::Unlimited);
        assert_eq!(PageLimit::from_raw(8).get(), 8);
    }

    #[test]
    fn total_pages_rounds_up() {
        for limit in 1..=7u64 {
            for total in 0..=40u64 {
                let expected = (total + limit - 1) / limit;
                assert_eq!(total_pages(total, per_page(limit)), expected);
            }
        }
    }

    #[test]
    fn unlimited_is_always_one_page() {
        assert_eq!(total_pages(0, PageLimit::Unlimited), 1);
        assert_eq!(total_pages(123, PageLimit::Unlimited), 1);
    }

    #[test]
    fn skip_follows_page_and_limit() {
        assert_eq!(skip(1, per_page(10)), 0);
        assert_eq!(skip(3, per_page(10)), 20);
        assert_eq!(skip(9, PageLimit::Unlimited), 0);
    }

    #[test]
    fn window_for_middle_page() {
        let window = PageWindow::compute(23, per_page(10), 2);
        assert_eq!(window.display_start, 11);
        assert_eq!(window.display_end, 20);
        assert_eq!(window.total_pages, 3);
        assert!(window.has_previous());
        assert!(window.has_next());
    }

    #[test]
    fn window_clamps_last_page() {
        let window = PageWindow::compute(23, per_page(10), 3);
        assert_eq!((window.display_start, window.display_end), (21, 23));
        assert!(!window.has_next());
        assert_eq!(window.to_string(), "Showing 21-23 of 23");
    }

    #[test]
    fn window_for_empty_result() {
        let window = PageWindow::compute(0, per_page(8), 1);
        assert_eq!((window.display_start, window.display_end), (0, 0));
        assert_eq!(window.total_pages, 0);
        assert!(!window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn unlimited_window_covers_everything() {
        let window = PageWindow::compute(17, PageLimit::Unlimited, 1);
        assert_eq!((window.display_start, window.display_end), (1, 17));
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let value = serde_json::to_value(Pagination::new(5, per_page(2), 2)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"totalCount": 5, "currentPage": 2, "totalPages": 3})
        );
    }
}
