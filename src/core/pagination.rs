/// First page, used when the requested page is missing or below 1
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the requested size is missing or below 1
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A normalised (1-based) page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    /// Build a page request, replacing non-positive values with the defaults
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: if page < 1 { DEFAULT_PAGE } else { page },
            page_size: if page_size < 1 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    /// Rows to skip: `(page - 1) * page_size`
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Number of pages needed to show `total` rows, `ceil(total / page_size)`
#[inline]
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total - 1) / page_size + 1
}
