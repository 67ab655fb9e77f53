// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod pagination;
pub mod proximity;
pub mod query_parser;
pub mod search;

pub use distance::{distance_km, format_distance, haversine_distance};
pub use filters::{matches_filters, matches_listing_filters};
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use proximity::{annotate, filter_by_radius, located, SearchError};
pub use query_parser::{parse_query, summarize, QueryParser, KNOWN_CITIES};
pub use search::{SearchOptions, SearchOutcome, Searcher, DEFAULT_NEARBY_RADIUS_KM};
