use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{Coordinate, ListingFilters};

/// Request to run a free-text property search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_location_pair"))]
pub struct SearchRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    #[serde(alias = "page_size", rename = "pageSize")]
    pub page_size: Option<usize>,
    #[serde(flatten)]
    pub filters: ListingFilters,
}

impl SearchRequest {
    /// Caller position, when both components were supplied
    pub fn current_location(&self) -> Option<Coordinate> {
        location_from(self.latitude, self.longitude)
    }
}

/// Request to browse every placeable property, e.g. for the map view
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_map_location"))]
pub struct MapRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub filters: ListingFilters,
}

impl MapRequest {
    pub fn current_location(&self) -> Option<Coordinate> {
        location_from(self.latitude, self.longitude)
    }
}

fn location_from(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinate> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
        _ => None,
    }
}

fn default_page() -> usize {
    1
}

fn validate_location_pair(req: &SearchRequest) -> Result<(), ValidationError> {
    check_location_pair(req.latitude, req.longitude)
}

fn validate_map_location(req: &MapRequest) -> Result<(), ValidationError> {
    check_location_pair(req.latitude, req.longitude)
}

/// Latitude and longitude must be supplied together and form a valid coordinate
fn check_location_pair(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ValidationError> {
    match (latitude, longitude) {
        (None, None) => Ok(()),
        (Some(latitude), Some(longitude)) => {
            if Coordinate::new(latitude, longitude).is_valid() {
                Ok(())
            } else {
                Err(ValidationError::new("coordinate_out_of_range"))
            }
        }
        _ => Err(ValidationError::new("latitude_and_longitude_required_together")),
    }
}

/// Request to parse a query without searching
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParseQueryRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "rooms"}"#).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, None);
        assert!(req.current_location().is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_search_request_reads_panel_filters() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"query": "flats", "verifiedOnly": true, "cities": ["Pokhara"], "types": ["FLAT", "ROOM"], "maxPrice": 20000}"#,
        )
        .unwrap();
        assert!(req.filters.verified_only);
        assert_eq!(req.filters.cities, vec!["Pokhara".to_string()]);
        assert_eq!(req.filters.categories.len(), 2);
        assert_eq!(req.filters.max_price, Some(20000));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_map_request_location_rules() {
        let req: MapRequest = serde_json::from_str("{}").unwrap();
        assert!(req.current_location().is_none());
        assert!(req.validate().is_ok());

        let req: MapRequest = serde_json::from_str(r#"{"longitude": 85.3}"#).unwrap();
        assert!(req.validate().is_err());

        let req: MapRequest =
            serde_json::from_str(r#"{"latitude": 27.7172, "longitude": 85.3240}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.current_location().is_some());
    }

    #[test]
    fn test_search_request_rejects_half_location() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"query": "rooms", "latitude": 27.7}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_search_request_rejects_oversized_page() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"query": "rooms", "pageSize": 500}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page_size"));
    }

    #[test]
    fn test_search_request_rejects_out_of_range_location() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"query": "rooms", "latitude": 95.0, "longitude": 85.0}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
