//! Griha Search - Location-aware property search for the GrihaMate rental app
//!
//! This library turns free-text (typed or transcribed) rental searches into
//! structured filters and runs them over a catalog snapshot, with optional
//! "near me" radius filtering and nearest-first ordering.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    distance_km, filter_by_radius, format_distance, haversine_distance, parse_query, summarize,
    QueryParser, SearchError, SearchOptions, SearchOutcome, Searcher,
};
pub use models::{
    AnnotatedProperty, Coordinate, ListingFilters, ParsedQuery, PropertyCategory, PropertyRecord,
};
