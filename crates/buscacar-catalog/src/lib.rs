pub mod classify;
mod feed;
pub mod logo;
mod normalize;
mod parse;
pub mod parser;
pub mod query;
pub mod store;

pub use normalize::DESCRIPTION_MAX_CHARS;
pub use parser::{parse_feed, ParseOutcome, ParseReport, SkipReason, FEATURED_COUNT};
pub use query::{
    extract_brand_and_model, run_query, similar, suggestions, ExtractedQuery, Facets, Page,
    QueryError, RangeFilter, SearchRequest, SortKey, Suggestion,
};
pub use store::CatalogStore;
