//! Pagination for the festival grid (12 cards per page)

use serde::Serialize;

/// Cards per grid page
pub const PAGE_SIZE: usize = 12;

/// Pagination metadata calculated from the filtered result count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub page_size: usize,
    /// Index of the first item on this page
    #[serde(skip)]
    pub offset: usize,
}

impl Pagination {
    /// The slice of `items` belonging to this page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// The page is clamped into `[1, total_pages]`; an empty result still
/// reports page 1.
///
/// # Examples
/// ```
/// use jtour_site::pagination::calculate_pagination;
///
/// // 30 festivals = 3 pages (12 + 12 + 6)
/// let p = calculate_pagination(30, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
///
/// // Out-of-bounds page gets clamped
/// let p = calculate_pagination(30, 99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 24);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize) -> Pagination {
    let total_pages = total_results.div_ceil(PAGE_SIZE);
    let page = requested_page.clamp(1, total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        total_results,
        page_size: PAGE_SIZE,
        offset,
    }
}
