use crate::models::{ListingFilters, ParsedQuery, PropertyRecord};

/// Check if a property satisfies the non-location filters of a parsed query
///
/// City and category are exact matches (city ignoring ASCII case), price bounds
/// and the bedroom minimum are inclusive. Absent filters always pass.
#[inline]
pub fn matches_filters(property: &PropertyRecord, parsed: &ParsedQuery) -> bool {
    // Check city
    if let Some(city) = &parsed.city {
        if !property.city.trim().eq_ignore_ascii_case(city) {
            return false;
        }
    }

    // Check category
    if let Some(category) = parsed.category {
        if property.property_type != category {
            return false;
        }
    }

    // Check price range
    if let Some(min_price) = parsed.min_price {
        if property.price < min_price as f64 {
            return false;
        }
    }
    if let Some(max_price) = parsed.max_price {
        if property.price > max_price as f64 {
            return false;
        }
    }

    // Check bedrooms
    if let Some(min_bedrooms) = parsed.min_bedrooms {
        if property.bedrooms < min_bedrooms {
            return false;
        }
    }

    true
}

/// Check if a property passes the filter panel selections
///
/// Cities and categories are "any of" lists; the price ceiling is inclusive.
#[inline]
pub fn matches_listing_filters(property: &PropertyRecord, filters: &ListingFilters) -> bool {
    // Check verification
    if filters.verified_only && !property.verified {
        return false;
    }

    // Check cities
    if !filters.cities.is_empty()
        && !filters
            .cities
            .iter()
            .any(|city| property.city.trim().eq_ignore_ascii_case(city.trim()))
    {
        return false;
    }

    // Check categories
    if !filters.categories.is_empty() && !filters.categories.contains(&property.property_type) {
        return false;
    }

    // Check price ceiling
    if let Some(max_price) = filters.max_price {
        if property.price > max_price as f64 {
            return false;
        }
    }

    true
}
