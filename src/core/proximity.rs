use thiserror::Error;

use crate::core::distance::distance_km;
use crate::models::{AnnotatedProperty, Coordinate, PropertyRecord};

/// Errors raised for invalid caller-supplied search parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Invalid radius: {0} km (must be a positive number)")]
    InvalidRadius(f64),

    #[error("Invalid center coordinate: ({latitude}, {longitude})")]
    InvalidCenter { latitude: f64, longitude: f64 },
}

/// Keep only the properties within `radius_km` of `center`, annotated with their distance
///
/// Properties without a usable coordinate can't be placed and are always excluded.
/// The comparison is inclusive. Output keeps the input order.
pub fn filter_by_radius(
    properties: &[PropertyRecord],
    center: Coordinate,
    radius_km: f64,
) -> Result<Vec<AnnotatedProperty>, SearchError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(SearchError::InvalidRadius(radius_km));
    }
    if !center.is_valid() {
        return Err(SearchError::InvalidCenter {
            latitude: center.latitude,
            longitude: center.longitude,
        });
    }

    let within: Vec<AnnotatedProperty> = properties
        .iter()
        .filter_map(|property| {
            let coordinate = property.coordinate()?;
            let distance = distance_km(center, coordinate);
            (distance <= radius_km).then(|| AnnotatedProperty::new(property.clone(), Some(distance)))
        })
        .collect();

    tracing::trace!(
        "Radius filter kept {} of {} properties within {} km",
        within.len(),
        properties.len(),
        radius_km
    );

    Ok(within)
}

/// Every property that can be placed on a map
///
/// Annotated with distance when a valid `center` is known, otherwise left unannotated.
pub fn located(properties: &[PropertyRecord], center: Option<Coordinate>) -> Vec<AnnotatedProperty> {
    let center = center.filter(Coordinate::is_valid);

    properties
        .iter()
        .filter_map(|property| {
            let coordinate = property.coordinate()?;
            let distance = center.map(|c| distance_km(c, coordinate));
            Some(AnnotatedProperty::new(property.clone(), distance))
        })
        .collect()
}

/// Annotate every placeable property with its distance from `center`, excluding nothing
pub fn annotate(properties: &[PropertyRecord], center: Coordinate) -> Vec<AnnotatedProperty> {
    properties
        .iter()
        .map(|property| {
            let distance = property.coordinate().map(|c| distance_km(center, c));
            AnnotatedProperty::new(property.clone(), distance)
        })
        .collect()
}
