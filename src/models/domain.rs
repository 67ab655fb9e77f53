use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside their geographic ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// True when the coordinate can be placed on a map.
    ///
    /// The catalog stores a missing pin as zero, so a zero component counts as unlocated.
    pub fn is_located(&self) -> bool {
        self.is_valid() && self.latitude != 0.0 && self.longitude != 0.0
    }
}

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyCategory {
    Room,
    Flat,
    Apartment,
    House,
}

impl PropertyCategory {
    /// Wire name used by the catalog backend
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Room => "ROOM",
            PropertyCategory::Flat => "FLAT",
            PropertyCategory::Apartment => "APARTMENT",
            PropertyCategory::House => "HOUSE",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rental listing as served by the catalog backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(rename = "propertyType")]
    pub property_type: PropertyCategory,
    #[serde(default)]
    pub verified: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PropertyRecord {
    /// Coordinate of the listing, if it has a usable pin.
    ///
    /// Out-of-range or zero coordinates are treated as unlocated.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                coordinate.is_located().then_some(coordinate)
            }
            _ => None,
        }
    }
}

/// A property together with its distance from the search reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedProperty {
    #[serde(flatten)]
    pub property: PropertyRecord,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none", default)]
    pub distance_km: Option<f64>,
    /// Display label such as "850m away" or "2.3km away"
    #[serde(rename = "distanceLabel", skip_serializing_if = "Option::is_none", default)]
    pub distance_label: Option<String>,
}

impl AnnotatedProperty {
    pub fn new(property: PropertyRecord, distance_km: Option<f64>) -> Self {
        Self {
            property,
            distance_km,
            distance_label: distance_km.map(crate::core::distance::format_distance),
        }
    }

    pub fn unannotated(property: PropertyRecord) -> Self {
        Self::new(property, None)
    }
}

/// Structured filters picked in the filter panel, applied on top of the parsed query
///
/// Every list is "any of"; an empty list or unset value doesn't filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFilters {
    #[serde(rename = "verifiedOnly")]
    pub verified_only: bool,
    pub cities: Vec<String>,
    #[serde(rename = "types")]
    pub categories: Vec<PropertyCategory>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<u64>,
}

impl ListingFilters {
    pub fn is_empty(&self) -> bool {
        !self.verified_only
            && self.cities.is_empty()
            && self.categories.is_empty()
            && self.max_price.is_none()
    }
}

/// Structured filters extracted from a free-text search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedQuery {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub city: Option<String>,
    #[serde(rename = "propertyType", skip_serializing_if = "Option::is_none", default)]
    pub category: Option<PropertyCategory>,
    #[serde(rename = "minPrice", skip_serializing_if = "Option::is_none", default)]
    pub min_price: Option<u64>,
    #[serde(rename = "maxPrice", skip_serializing_if = "Option::is_none", default)]
    pub max_price: Option<u64>,
    #[serde(rename = "minBedrooms", skip_serializing_if = "Option::is_none", default)]
    pub min_bedrooms: Option<u32>,
    #[serde(rename = "nearby", skip_serializing_if = "is_false", default)]
    pub nearby_intent: bool,
    #[serde(rename = "useCurrentLocation", skip_serializing_if = "is_false", default)]
    pub use_current_location: bool,
    #[serde(rename = "originalQuery")]
    pub original_query: String,
}

impl ParsedQuery {
    /// A query carrying nothing but the input text
    pub fn empty(original_query: impl Into<String>) -> Self {
        Self {
            original_query: original_query.into(),
            ..Default::default()
        }
    }

    /// True when no filter or intent was extracted
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
            && !self.nearby_intent
            && !self.use_current_location
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
