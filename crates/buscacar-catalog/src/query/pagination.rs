//! 1-indexed offset pagination over a result list.
//!
//! Page `N` of size `S` is the slice `[(N - 1) * S, N * S)`. A page past the
//! end is empty rather than an error, so a client holding a stale page number
//! after the result set shrank still gets a well-formed response.

use serde::Serialize;

use super::QueryError;

pub const DEFAULT_PAGE_SIZE: usize = 24;

/// One page of results plus the totals needed to render page controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Converts every item, keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Cuts page `page` of `page_size` items out of `items`.
///
/// # Errors
///
/// Returns [`QueryError::InvalidPage`] if `page` is 0 and
/// [`QueryError::InvalidPageSize`] if `page_size` is 0.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Result<Page<T>, QueryError> {
    if page == 0 {
        return Err(QueryError::InvalidPage(page));
    }
    if page_size == 0 {
        return Err(QueryError::InvalidPageSize(page_size));
    }

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Ok(Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    })
}
