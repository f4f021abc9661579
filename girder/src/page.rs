//! Page window arithmetic for the visible slice.

/// The `(page, size, total)` triple governing which slice of an ordered
/// sequence is visible.
///
/// `page` is 1-based and always clamped to `[1, max(1, total_pages)]`;
/// changing `size` or `total` re-clamps before the next slice, so an
/// out-of-range window renders empty instead of faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    size: usize,
    total: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            total: 0,
        }
    }
}

impl PageWindow {
    /// Creates a window at `page` with `size` items per page and an unknown
    /// total of zero.
    pub fn new(page: usize, size: usize) -> Self {
        let mut window = Self {
            page: page.max(1),
            size: size.max(1),
            total: 0,
        };
        window.clamp_page();
        window
    }

    /// Returns the current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of records across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the derived page count, `ceil(total / size)`.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.size)
    }

    /// Requests a page; the result is clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.clamp_page();
    }

    /// Changes the page size (minimum 1) and re-clamps the page.
    pub fn set_size(&mut self, size: usize) {
        self.size = size.max(1);
        self.clamp_page();
    }

    /// Updates the total (e.g. after a query resolves) and re-clamps the
    /// page.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let max = self.total_pages().max(1);
        self.page = self.page.clamp(1, max);
    }

    /// Returns the visible slice `[(page-1)*size, page*size)` clamped to the
    /// sequence bounds. Never returns more than `size` items; out-of-range
    /// windows yield an empty slice.
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.size).min(records.len());
        let end = start.saturating_add(self.size).min(records.len());
        &records[start..end]
    }
}
