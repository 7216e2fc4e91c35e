//! Page - offset pagination parameters (page/take)

use serde::{Deserialize, Serialize};

/// Default page size
const DEFAULT_TAKE: i64 = 20;

/// Largest allowed page size
const MAX_TAKE: i64 = 100;

/// 1-based page/take pagination, as used by every listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub take: i64,
}

impl Page {
    /// Build a page, clamping out-of-range values instead of rejecting them
    pub fn new(page: i64, take: i64) -> Self {
        Self {
            page: page.max(1),
            take: take.clamp(1, MAX_TAKE),
        }
    }

    /// Number of rows to skip
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.take
    }

    /// Number of rows to fetch
    #[inline]
    pub fn limit(&self) -> i64 {
        self.take
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            take: DEFAULT_TAKE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_computation() {
        let page = Page::new(3, 20);
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_clamping() {
        let page = Page::new(0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.take, 1);

        let page = Page::new(1, 10_000);
        assert_eq!(page.take, 100);
    }

    #[test]
    fn test_default() {
        let page = Page::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.take, DEFAULT_TAKE);
        assert_eq!(page.offset(), 0);
    }
}
