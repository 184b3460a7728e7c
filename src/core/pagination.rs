//! Fixed-size pages over the filtered feed.
//!
//! Page numbers start at 1. The page-link strip shows the current page with
//! one neighbor on each side, or the first three pages when on page 1, and
//! never a page past the last one.
//!
//! ```
//! use chatstats::core::pagination::Pagination;
//!
//! let p = Pagination::new(120, 1, 50);
//! assert_eq!(p.last_page, 3);
//! assert_eq!(p.page_links, vec![1, 2, 3]);
//! assert_eq!(p.range(), 0..50);
//!
//! let p = Pagination::new(120, 3, 50);
//! assert_eq!(p.page_links, vec![2, 3]);
//! assert!(!p.has_next);
//! assert_eq!(p.range(), 100..120);
//! ```

use std::ops::Range;

use serde::Serialize;

use crate::Message;

/// Page geometry for a given item count and page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_items: usize,
    pub page_size: usize,
    /// Current page, at least 1.
    pub current_page: usize,
    /// `ceil(total_items / page_size)`, 0 when there are no items.
    pub last_page: usize,
    /// Ascending, deduplicated, within `1..=last_page`.
    pub page_links: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Pagination {
    /// Computes the pagination for `page`. A page of 0 is treated as 1 and
    /// a zero page size as 1.
    pub fn new(total_items: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let current_page = page.max(1);
        let last_page = last_page(total_items, page_size);

        Self {
            total_items,
            page_size,
            current_page,
            last_page,
            page_links: page_links(current_page, last_page),
            has_prev: current_page > 1,
            has_next: current_page < last_page,
        }
    }

    /// Index range of the current page's items. Empty past the last page.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (self.current_page * self.page_size).min(self.total_items);
        start..end
    }

    /// Returns the current page's slice of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }
}

/// A page of messages plus its navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageWindow<'a> {
    pub items: Vec<&'a Message>,
    pub current_page: usize,
    pub last_page: usize,
    pub page_links: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<'a> PageWindow<'a> {
    /// Cuts page `page` out of `messages`.
    pub fn new(messages: &[&'a Message], page: usize, page_size: usize) -> Self {
        let pagination = Pagination::new(messages.len(), page, page_size);
        Self {
            items: pagination.slice(messages).to_vec(),
            current_page: pagination.current_page,
            last_page: pagination.last_page,
            page_links: pagination.page_links,
            has_prev: pagination.has_prev,
            has_next: pagination.has_next,
        }
    }
}

/// Number of pages needed for `total_items`.
pub fn last_page(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// The sliding page-link strip.
pub fn page_links(page: usize, last_page: usize) -> Vec<usize> {
    let page = page.max(1);
    let candidates = if page == 1 {
        [1, 2, 3]
    } else {
        [page - 1, page, page + 1]
    };
    candidates.into_iter().filter(|&p| p <= last_page).collect()
}
