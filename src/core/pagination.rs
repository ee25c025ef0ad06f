//! Page-count math and page clamping for list views.

/// `ceil(total / page_size)`, saturating at `u32::MAX`. Zero records means
/// zero pages; callers clamp navigation with [`clamp_page`], which treats an
/// empty list as one page.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    debug_assert!(page_size > 0);
    total.div_ceil(page_size as u64).min(u32::MAX as u64) as u32
}

/// Clamp a requested page into `[1, max(total_pages, 1)]`. No wraparound.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Tracks the active page of one list view and feeds it back into the query.
#[derive(Debug, Clone)]
pub struct Pager {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    /// Install a fresh total; the active page re-clamps against it, so a
    /// shrinking result set can never leave the pager past the end.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.page = clamp_page(self.page, self.total_pages());
    }

    /// Returns whether the active page actually changed.
    pub fn goto(&mut self, page: u32) -> bool {
        let clamped = clamp_page(page, self.total_pages());
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    pub fn next(&mut self) -> bool {
        self.goto(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        self.goto(self.page.saturating_sub(1))
    }

    /// Footer line for list output.
    pub fn range_info(&self) -> String {
        if self.total == 0 {
            return "No records found".to_string();
        }
        let start = (self.page as u64 - 1) * self.page_size as u64 + 1;
        let end = (start + self.page_size as u64 - 1).min(self.total);
        format!(
            "Showing {}-{} of {} records (Page {} of {})",
            start,
            end,
            self.total,
            self.page,
            self.total_pages()
        )
    }
}
