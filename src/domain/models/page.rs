//! Page, window and link value types

/// One page of results handed back by a data source.
///
/// A page knows nothing about offset or limit; those come from the request.
/// Completeness is signalled by `has_more`, `total_results`, both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedPage<T> {
    items: Vec<T>,
    has_more: Option<bool>,
    total_results: Option<u64>,
}

impl<T> PaginatedPage<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            has_more: None,
            total_results: None,
        }
    }

    /// Page whose total size across all pages is known.
    pub fn counted(items: Vec<T>, total_results: u64) -> Self {
        Self::new(items).with_total_results(total_results)
    }

    /// Page that only knows whether another page follows.
    pub fn open_ended(items: Vec<T>, has_more: bool) -> Self {
        Self::new(items).with_has_more(has_more)
    }

    pub fn with_has_more(self, has_more: bool) -> Self {
        Self {
            has_more: Some(has_more),
            ..self
        }
    }

    pub fn with_total_results(self, total_results: u64) -> Self {
        Self {
            total_results: Some(total_results),
            ..self
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn has_more(&self) -> Option<bool> {
        self.has_more
    }

    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Offset and limit in force for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u32,
}

impl PageWindow {
    pub fn new(offset: u64, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Offset of the page after this one.
    pub fn next_offset(&self) -> u64 {
        self.offset.saturating_add(u64::from(self.limit))
    }

    /// Offset of the page before this one, clamped at zero.
    pub fn prev_offset(&self) -> u64 {
        self.offset.saturating_sub(u64::from(self.limit))
    }
}

/// Navigation links for a page. `first` can always be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLinks {
    pub first: String,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_keeps_both_signals() {
        let page = PaginatedPage::new(vec![1, 2, 3])
            .with_has_more(false)
            .with_total_results(50);
        assert_eq!(page.items(), &[1, 2, 3]);
        assert_eq!(page.has_more(), Some(false));
        assert_eq!(page.total_results(), Some(50));
    }

    #[test]
    fn page_without_signals() {
        let page: PaginatedPage<u8> = PaginatedPage::new(vec![]);
        assert_eq!(page.has_more(), None);
        assert_eq!(page.total_results(), None);
    }

    #[test]
    fn prev_offset_clamps_at_zero() {
        assert_eq!(PageWindow::new(5, 20).prev_offset(), 0);
        assert_eq!(PageWindow::new(45, 20).prev_offset(), 25);
    }

    #[test]
    fn next_offset_adds_limit() {
        assert_eq!(PageWindow::new(40, 20).next_offset(), 60);
        assert_eq!(PageWindow::new(u64::MAX, 20).next_offset(), u64::MAX);
    }
}
