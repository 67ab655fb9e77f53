// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnnotatedProperty, Coordinate, ListingFilters, ParsedQuery, PropertyCategory, PropertyRecord,
};
pub use requests::{MapRequest, ParseQueryRequest, SearchRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MapResponse, ParseQueryResponse, SearchResponse, SearchStatus,
};
