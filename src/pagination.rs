//! # Pagination
//!
//! [`Paginator`] slices an ordered sequence into fixed-size pages. The only state it
//! keeps is the current page and the page size; every other value (total pages,
//! visible slice, navigation flags) is recomputed from `(items, page, size)`.
//!
//! An empty sequence has exactly one (empty) page, so `current_page()` is always a
//! valid page number.
//!
//! ```rust
//! use seo_dashboard::pagination::Paginator;
//!
//! let mut pages = Paginator::new((1..=23).collect::<Vec<_>>(), 10);
//! assert_eq!(pages.total_pages(), 3);
//! pages.go_to_page(3);
//! assert_eq!(pages.visible(), &[21, 22, 23]);
//! assert!(!pages.has_next());
//! ```

use crate::platform::DEFAULT_KEYWORD_PAGE_SIZE;

/// Page sizes offered by the table footers
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    items: Vec<T>,
    page: usize,
    page_size: usize,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_KEYWORD_PAGE_SIZE)
    }
}

impl<T> Paginator<T> {
    /// Creates a paginator positioned on page 1. A page size of zero is treated as 1.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current page, 1-based
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`, or 1 for an empty sequence
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// The items on the current page
    pub fn visible(&self) -> &[T] {
        let start = ((self.page - 1) * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Moves to page `n`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages());
    }

    pub fn next(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn previous(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    pub fn last(&mut self) {
        self.page = self.total_pages();
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Replaces the sequence and returns to page 1.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = 1;
    }

    /// 1-based `(first, last)` positions shown on the current page, `None` when empty
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.visible().len() - 1))
    }

    /// Up to `window` consecutive page numbers centered on the current page
    pub fn page_numbers(&self, window: usize) -> Vec<usize> {
        let total = self.total_pages();
        let window = window.clamp(1, total);
        let start = self
            .page
            .saturating_sub(window / 2)
            .clamp(1, total + 1 - window);
        (start..start + window).collect()
    }
}
