//! Pagination plumbing for list endpoints.

use serde::{Deserialize, Serialize};

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Default page size for availability and overlap listings.
    pub const DEFAULT_SIZE: usize = 5;
    /// Default page size for user listings.
    pub const DEFAULT_USER_SIZE: usize = 10;

    pub fn new(page: usize, size: usize) -> Self {
        // A zero page size would make every page empty and total_pages
        // undefined; clamp to 1.
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice one page out of a fully materialized result set.
    ///
    /// The local repository and in-memory tests build pages this way; the
    /// Postgres backend pushes LIMIT/OFFSET into the query instead and uses
    /// [`Page::from_parts`].
    pub fn from_vec(mut all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len();
        let total_pages = total_items.div_ceil(request.size);

        let start = request.offset().min(total_items);
        let end = (start + request.size).min(total_items);
        let items = all.drain(start..end).collect();

        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages,
        }
    }

    /// Build a page from an already-sliced item list and a known total.
    pub fn from_parts(items: Vec<T>, request: PageRequest, total_items: usize) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages: total_items.div_ceil(request.size),
        }
    }
}
