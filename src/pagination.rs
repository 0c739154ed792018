//! Pager math for the table footer.

use crate::models::{FilterState, Pagination};

/// Footer state derived from the current filters and the loaded metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub limit: u32,
    pub meta: Option<Pagination>,
}

impl Pager {
    #[must_use]
    pub fn new(filters: &FilterState, meta: Option<&Pagination>) -> Self {
        Self {
            page: filters.page,
            limit: filters.limit,
            meta: meta.copied(),
        }
    }

    #[must_use]
    pub fn can_first(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.meta
            .is_some_and(|m| u64::from(self.page) < m.total_pages)
    }

    #[must_use]
    pub fn can_last(&self) -> bool {
        self.can_next()
    }

    /// Target of the "last page" control; 1 when the count is unknown
    #[must_use]
    pub fn last_page(&self) -> u32 {
        match self.meta {
            Some(m) if m.total_pages > 0 => u32::try_from(m.total_pages).unwrap_or(u32::MAX),
            _ => 1,
        }
    }

    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.last_page())
    }

    /// `"{start}-{end} of {total}"`, or `"0 of 0"` before any metadata
    /// has arrived
    #[must_use]
    pub fn row_summary(&self) -> String {
        let Some(meta) = self.meta else {
            return "0 of 0".to_string();
        };
        let page = u64::from(self.page);
        let limit = u64::from(self.limit);
        let start = if meta.total == 0 {
            0
        } else {
            page.saturating_sub(1) * limit + 1
        };
        let end = (page * limit).min(meta.total);
        format!("{start}-{end} of {}", meta.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(page: u32, limit: u32, meta: Option<(u64, u64)>) -> Pager {
        Pager {
            page,
            limit,
            meta: meta.map(|(total, total_pages)| Pagination { total, total_pages }),
        }
    }

    #[test]
    fn test_row_summary() {
        assert_eq!(pager(1, 10, Some((0, 0))).row_summary(), "0-0 of 0");
        assert_eq!(pager(2, 10, Some((25, 3))).row_summary(), "11-20 of 25");
        assert_eq!(pager(3, 10, Some((25, 3))).row_summary(), "21-25 of 25");
        assert_eq!(pager(1, 10, None).row_summary(), "0 of 0");
    }

    #[test]
    fn test_first_page_boundaries() {
        let p = pager(1, 10, Some((25, 3)));
        assert!(!p.can_first());
        assert!(!p.can_prev());
        assert!(p.can_next());
        assert!(p.can_last());
    }

    #[test]
    fn test_last_page_boundaries() {
        let p = pager(3, 10, Some((25, 3)));
        assert!(p.can_first());
        assert!(p.can_prev());
        assert!(!p.can_next());
        assert!(!p.can_last());
        assert_eq!(p.last_page(), 3);
        assert_eq!(p.page_label(), "Page 3 of 3");
    }

    #[test]
    fn test_without_metadata() {
        let p = pager(2, 20, None);
        assert!(p.can_prev());
        assert!(!p.can_next());
        assert!(!p.can_last());
        assert_eq!(p.last_page(), 1);
        assert_eq!(p.page_label(), "Page 2 of 1");
    }

    #[test]
    fn test_zero_total_pages() {
        let p = pager(1, 10, Some((0, 0)));
        assert!(!p.can_next());
        assert_eq!(p.page_label(), "Page 1 of 1");
    }

    #[test]
    fn test_new_from_filters() {
        let filters = FilterState {
            page: 4,
            limit: 50,
            ..FilterState::default()
        };
        let meta = Pagination {
            total: 500,
            total_pages: 10,
        };
        let p = Pager::new(&filters, Some(&meta));
        assert_eq!(p.row_summary(), "151-200 of 500");
    }
}
