//! Listing pagination.

use quire_core::routes::page_path;

/// One page of a paginated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginated<'a, T> {
    /// Items on this page.
    pub items: &'a [T],

    /// Number of pages, at least one.
    pub total_pages: usize,

    /// The page shown, clamped to `1..=total_pages`.
    pub current_page: usize,
}

impl<T> Paginated<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Route of the previous page under `base`, if any.
    pub fn previous_path(&self, base: &str) -> Option<String> {
        self.has_previous()
            .then(|| page_path(base, self.current_page - 1))
    }

    /// Route of the next page under `base`, if any.
    pub fn next_path(&self, base: &str) -> Option<String> {
        self.has_next().then(|| page_path(base, self.current_page + 1))
    }
}

/// Number of pages needed for `len` items. An empty sequence still has one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice `items` into the window for `requested_page` (1-based).
///
/// Out-of-range pages are clamped rather than rejected, and a page size of
/// zero is treated as one.
pub fn paginate<T>(items: &[T], requested_page: usize, page_size: usize) -> Paginated<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = requested_page.clamp(1, total_pages);

    let start = ((current_page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Paginated {
        items: &items[start..end],
        total_pages,
        current_page,
    }
}
