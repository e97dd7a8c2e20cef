//! Read-only queries over a [`CatalogStore`].
//!
//! Every function borrows from the store and allocates only the result
//! vectors. The search page pipeline is search, then facets, then sort, then
//! pagination; [`run_query`] composes it.

mod extract;
mod filter;
mod pagination;
mod search;
mod sort;
mod suggest;

use buscacar_core::VehicleRecord;
use thiserror::Error;

use crate::store::CatalogStore;

pub use extract::{extract_brand_and_model, ExtractedQuery};
pub use filter::{filter, Facets, RangeFilter};
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use search::search;
pub use sort::{sort, SortKey};
pub use suggest::{suggestions, Suggestion, MIN_SUGGESTION_CHARS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),

    #[error("page must be 1 or greater, got {0}")]
    InvalidPage(usize),

    #[error("page size must be 1 or greater, got {0}")]
    InvalidPageSize(usize),
}

/// Everything the search page sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub facets: Facets,
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            facets: Facets::default(),
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Runs the full search pipeline against the store.
///
/// # Errors
///
/// Returns [`QueryError`] when the requested page or page size is zero.
pub fn run_query<'a>(
    store: &'a CatalogStore,
    request: &SearchRequest,
) -> Result<Page<&'a VehicleRecord>, QueryError> {
    let matched = search(store.all_vehicles(), &request.query);
    let mut selected = if request.facets.is_empty() {
        matched
    } else {
        filter(&matched, &request.facets)
    };
    sort(&mut selected, request.sort);

    tracing::debug!(
        query = %request.query,
        sort = %request.sort,
        matched = selected.len(),
        page = request.page,
        "ran catalog query"
    );

    paginate(selected, request.page, request.page_size)
}

/// Other vehicles of the same brand as `id`, in catalog order.
///
/// Returns an empty list when `id` is not in the store.
#[must_use]
pub fn similar<'a>(store: &'a CatalogStore, id: &str, limit: usize) -> Vec<&'a VehicleRecord> {
    let Some(target) = store.vehicle(id) else {
        return Vec::new();
    };

    store
        .all_vehicles()
        .iter()
        .filter(|v| v.brand == target.brand && v.id != target.id)
        .take(limit)
        .collect()
}
