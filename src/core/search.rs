use std::cmp::Ordering;

use crate::core::{
    filters::{matches_filters, matches_listing_filters},
    proximity::{annotate, filter_by_radius, located, SearchError},
    query_parser::QueryParser,
};
use crate::models::{AnnotatedProperty, Coordinate, ListingFilters, ParsedQuery, PropertyRecord};

/// Radius used for "nearby" searches
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Result of running a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Filtered and ordered results
    Results {
        parsed: ParsedQuery,
        results: Vec<AnnotatedProperty>,
    },
    /// The query asked for nearby results but no usable position was supplied.
    /// The caller should obtain the user's location and search again.
    LocationRequired { parsed: ParsedQuery },
}

impl SearchOutcome {
    pub fn parsed(&self) -> &ParsedQuery {
        match self {
            SearchOutcome::Results { parsed, .. } => parsed,
            SearchOutcome::LocationRequired { parsed } => parsed,
        }
    }

    pub fn is_location_required(&self) -> bool {
        matches!(self, SearchOutcome::LocationRequired { .. })
    }

    /// Results, or `None` when a location is required
    pub fn into_results(self) -> Option<Vec<AnnotatedProperty>> {
        match self {
            SearchOutcome::Results { results, .. } => Some(results),
            SearchOutcome::LocationRequired { .. } => None,
        }
    }
}

/// Tunables for the search pipeline
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub nearby_radius_km: f64,
    pub parser: QueryParser,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            parser: QueryParser::default(),
        }
    }
}

/// Search orchestrator - turns a raw query into an ordered result list
///
/// # Pipeline Stages
/// 1. Parse the query into structured filters
/// 2. Apply city, category, price and bedroom filters
/// 3. Nearby intent: radius filter around the caller, nearest first
/// 4. Location only: annotate distances, nearest first, unlocated last
/// 5. Neither: original order, unannotated
///
/// Holds no state between calls and can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    options: SearchOptions,
}

impl Searcher {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn parser(&self) -> &QueryParser {
        &self.options.parser
    }

    pub fn nearby_radius_km(&self) -> f64 {
        self.options.nearby_radius_km
    }

    /// Run the full search pipeline over a property snapshot
    ///
    /// # Arguments
    /// * `properties` - Snapshot from the catalog, read only
    /// * `raw_query` - Typed or transcribed search text
    /// * `current_location` - Caller position, if known
    ///
    /// # Returns
    /// Ordered results, or `LocationRequired` when nearby intent can't be served
    pub fn search(
        &self,
        properties: &[PropertyRecord],
        raw_query: &str,
        current_location: Option<Coordinate>,
    ) -> Result<SearchOutcome, SearchError> {
        let parsed = self.options.parser.parse(raw_query);
        self.search_parsed(properties, parsed, current_location)
    }

    /// Run stages 2-5 for an already parsed query
    pub fn search_parsed(
        &self,
        properties: &[PropertyRecord],
        parsed: ParsedQuery,
        current_location: Option<Coordinate>,
    ) -> Result<SearchOutcome, SearchError> {
        self.search_filtered(properties, parsed, &ListingFilters::default(), current_location)
    }

    /// Same as [`Searcher::search_parsed`], with filter panel selections applied in stage 2
    pub fn search_filtered(
        &self,
        properties: &[PropertyRecord],
        parsed: ParsedQuery,
        filters: &ListingFilters,
        current_location: Option<Coordinate>,
    ) -> Result<SearchOutcome, SearchError> {
        // An unplaceable position is as good as none
        let current_location = current_location.filter(Coordinate::is_valid);

        let candidates: Vec<PropertyRecord> = properties
            .iter()
            .filter(|property| matches_filters(property, &parsed))
            .filter(|property| matches_listing_filters(property, filters))
            .cloned()
            .collect();

        tracing::debug!(
            "Search '{}': {} of {} properties pass filters (nearby: {}, location: {})",
            parsed.original_query,
            candidates.len(),
            properties.len(),
            parsed.nearby_intent,
            current_location.is_some()
        );

        let results = match (parsed.nearby_intent, current_location) {
            (true, None) => return Ok(SearchOutcome::LocationRequired { parsed }),
            (true, Some(center)) => {
                let mut within = filter_by_radius(&candidates, center, self.options.nearby_radius_km)?;
                within.sort_by(by_distance);
                within
            }
            (false, Some(center)) => {
                let mut annotated = annotate(&candidates, center);
                annotated.sort_by(by_distance);
                annotated
            }
            (false, None) => candidates.into_iter().map(AnnotatedProperty::unannotated).collect(),
        };

        Ok(SearchOutcome::Results { parsed, results })
    }

    /// Every placeable property passing the filter panel, for the map view
    ///
    /// Keeps catalog order. Distances are annotated when a valid position is known.
    pub fn browse(
        &self,
        properties: &[PropertyRecord],
        filters: &ListingFilters,
        current_location: Option<Coordinate>,
    ) -> Vec<AnnotatedProperty> {
        let candidates: Vec<PropertyRecord> = properties
            .iter()
            .filter(|property| matches_listing_filters(property, filters))
            .cloned()
            .collect();

        let placed = located(&candidates, current_location);

        tracing::debug!(
            "Browse: {} of {} properties placeable after filters",
            placed.len(),
            properties.len()
        );

        placed
    }
}

/// Nearest first; unannotated entries sort after every annotated one.
/// Used with the stable `sort_by`, so ties keep their input order.
fn by_distance(a: &AnnotatedProperty, b: &AnnotatedProperty) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(da), Some(db)) => da.total_cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
