// Integration tests for Griha Search

use griha_search::core::{
    distance::distance_km,
    proximity::filter_by_radius,
    query_parser::parse_query,
    search::{SearchOptions, SearchOutcome, Searcher},
    QueryParser,
};
use griha_search::models::{Coordinate, PropertyCategory, PropertyRecord};

// One degree of latitude on the sphere used for distances
const KM_PER_DEGREE_LAT: f64 = 6371.0 * std::f64::consts::PI / 180.0;

fn create_test_property(
    id: i64,
    city: &str,
    category: PropertyCategory,
    coordinate: Option<(f64, f64)>,
) -> PropertyRecord {
    PropertyRecord {
        id,
        title: format!("{} {}", category, id),
        address: format!("Tole {}", id),
        city: city.to_string(),
        latitude: coordinate.map(|(lat, _)| lat),
        longitude: coordinate.map(|(_, lon)| lon),
        price: 10000.0 + (id as f64) * 1000.0,
        bedrooms: (id % 4) as u32,
        property_type: category,
        verified: id % 2 == 0,
        created_at: None,
    }
}

fn kathmandu() -> Coordinate {
    Coordinate::new(27.7172, 85.3240)
}

/// A point `km` kilometres due north of `origin`
fn north_of(origin: Coordinate, km: f64) -> (f64, f64) {
    (origin.latitude + km / KM_PER_DEGREE_LAT, origin.longitude)
}

fn create_catalog() -> Vec<PropertyRecord> {
    vec![
        create_test_property(1, "Pokhara", PropertyCategory::Flat, Some((28.2096, 83.9856))),
        create_test_property(2, "Kathmandu", PropertyCategory::Room, Some(north_of(kathmandu(), 1.0))),
        create_test_property(3, "Pokhara", PropertyCategory::Room, Some((28.2150, 83.9600))),
        create_test_property(4, "Pokhara", PropertyCategory::Flat, None),
        create_test_property(5, "Kathmandu", PropertyCategory::Room, Some(north_of(kathmandu(), 3.0))),
        create_test_property(6, "pokhara", PropertyCategory::Flat, Some((28.1900, 83.9700))),
        create_test_property(7, "Kathmandu", PropertyCategory::Room, Some(north_of(kathmandu(), 12.0))),
        create_test_property(8, "Lalitpur", PropertyCategory::House, Some((27.6588, 85.3247))),
        create_test_property(9, "Kathmandu", PropertyCategory::Room, None),
    ]
}

#[test]
fn test_distance_symmetry() {
    let points = [
        Coordinate::new(27.7172, 85.3240),
        Coordinate::new(28.2096, 83.9856),
        Coordinate::new(26.4525, 87.2718),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(51.5074, -0.1278),
        Coordinate::new(89.9, 179.9),
        Coordinate::new(-89.9, -179.9),
    ];

    for a in points {
        for b in points {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            assert!((ab - ba).abs() < 1e-6, "{:?} <-> {:?}: {} vs {}", a, b, ab, ba);
        }
    }
}

#[test]
fn test_distance_identity() {
    for (lat, lon) in [(27.7172, 85.3240), (-90.0, 180.0), (45.0, -120.5), (0.0, 0.0)] {
        let point = Coordinate::new(lat, lon);
        assert_eq!(distance_km(point, point), 0.0);
    }
}

#[test]
fn test_radius_monotonicity() {
    let catalog = create_catalog();
    let center = kathmandu();
    let radii = [0.5, 1.0, 2.5, 5.0, 15.0, 150.0, 500.0];

    for window in radii.windows(2) {
        let smaller: Vec<i64> = filter_by_radius(&catalog, center, window[0])
            .unwrap()
            .iter()
            .map(|p| p.property.id)
            .collect();
        let larger: Vec<i64> = filter_by_radius(&catalog, center, window[1])
            .unwrap()
            .iter()
            .map(|p| p.property.id)
            .collect();

        for id in &smaller {
            assert!(
                larger.contains(id),
                "property {} within {} km but not within {} km",
                id,
                window[0],
                window[1]
            );
        }
    }
}

#[test]
fn test_parser_totality() {
    let inputs = [
        "",
        "   ",
        "\t\n",
        "asdf qwerty",
        "under",
        "between and",
        "99999999999999999999999k rooms",
        "under 99999999999999999999999",
        "कोठा काठमाडौं",
        "🏠 near 🏢",
    ];

    for input in inputs {
        let parsed = parse_query(input);
        assert_eq!(parsed.original_query, input);
    }

    assert!(parse_query("").is_empty());
    assert!(parse_query("   ").is_empty());
    assert!(parse_query("asdf qwerty").is_empty());
}

#[test]
fn test_parser_idempotent_on_original_query() {
    let queries = [
        "Show me 2BHK apartments in Kathmandu under 30000",
        "Find rooms near me",
        "houses in Lalitpur between 40k and 60k",
        "three bedroom flat above 20 thousand",
    ];

    for query in queries {
        let first = parse_query(query);
        let second = parse_query(&first.original_query);
        assert_eq!(first, second);
    }
}

#[test]
fn test_price_patterns_never_merge() {
    let parsed = parse_query("rooms between 5000 and 10000 or under 8000");
    assert_eq!(parsed.max_price, Some(8000));
    assert_eq!(parsed.min_price, None);

    let parsed = parse_query("flats above 15000 and 25000");
    assert_eq!(parsed.min_price, Some(15000));
    assert_eq!(parsed.max_price, None);
}

#[test]
fn test_scenario_full_query() {
    let parsed = parse_query("Show me 2BHK apartments in Kathmandu under 30000");

    assert_eq!(parsed.city.as_deref(), Some("Kathmandu"));
    assert_eq!(parsed.category, Some(PropertyCategory::Apartment));
    assert_eq!(parsed.min_bedrooms, Some(2));
    assert_eq!(parsed.max_price, Some(30000));
}

#[test]
fn test_scenario_rooms_near_me() {
    let parsed = parse_query("Find rooms near me");

    assert_eq!(parsed.category, Some(PropertyCategory::Room));
    assert!(parsed.nearby_intent);
    assert!(parsed.use_current_location);
}

#[test]
fn test_scenario_same_point_is_zero() {
    let point = Coordinate::new(27.7172, 85.3240);
    assert_eq!(distance_km(point, point), 0.0);
}

#[test]
fn test_scenario_radius_keeps_only_near() {
    let center = kathmandu();
    let properties = vec![
        create_test_property(1, "Kathmandu", PropertyCategory::Room, Some(north_of(center, 5.0))),
        create_test_property(2, "Kathmandu", PropertyCategory::Room, Some(north_of(center, 10.0))),
        create_test_property(3, "Kathmandu", PropertyCategory::Room, None),
    ];

    let within = filter_by_radius(&properties, center, 7.0).unwrap();

    assert_eq!(within.len(), 1);
    assert_eq!(within[0].property.id, 1);
    let distance = within[0].distance_km.unwrap();
    assert!((distance - 5.0).abs() < 0.01, "got {}", distance);
}

#[test]
fn test_scenario_city_and_category_without_location() {
    let catalog = create_catalog();
    let searcher = Searcher::default();

    let outcome = searcher.search(&catalog, "verified flats in Pokhara", None).unwrap();
    let results = outcome.into_results().expect("no location should be required");

    let ids: Vec<i64> = results.iter().map(|p| p.property.id).collect();
    assert_eq!(ids, vec![1, 4, 6]);
    assert!(results.iter().all(|p| p.distance_km.is_none()));
}

#[test]
fn test_scenario_closest_rooms_without_location() {
    let catalog = create_catalog();
    let searcher = Searcher::default();

    let outcome = searcher.search(&catalog, "closest rooms", None).unwrap();

    assert!(outcome.is_location_required());
    assert_eq!(outcome.parsed().category, Some(PropertyCategory::Room));
}

#[test]
fn test_integration_nearby_search_end_to_end() {
    let catalog = create_catalog();
    let searcher = Searcher::default();

    let outcome = searcher
        .search(&catalog, "closest rooms", Some(kathmandu()))
        .unwrap();

    match outcome {
        SearchOutcome::Results { parsed, results } => {
            assert!(parsed.nearby_intent);

            // 1 km and 3 km rooms are inside the 5 km default, 12 km is not
            let ids: Vec<i64> = results.iter().map(|p| p.property.id).collect();
            assert_eq!(ids, vec![2, 5]);

            for pair in results.windows(2) {
                assert!(pair[0].distance_km <= pair[1].distance_km);
            }
        }
        SearchOutcome::LocationRequired { .. } => panic!("location was supplied"),
    }
}

#[test]
fn test_integration_location_orders_without_excluding() {
    let catalog = create_catalog();
    let searcher = Searcher::default();

    let results = searcher
        .search(&catalog, "rooms in kathmandu", Some(kathmandu()))
        .unwrap()
        .into_results()
        .unwrap();

    // Every Kathmandu room, nearest first, the unlocated one last
    let ids: Vec<i64> = results.iter().map(|p| p.property.id).collect();
    assert_eq!(ids, vec![2, 5, 7, 9]);
    assert!(results[3].distance_km.is_none());
}

#[test]
fn test_integration_configured_radius() {
    let catalog = create_catalog();
    let searcher = Searcher::new(SearchOptions {
        nearby_radius_km: 15.0,
        parser: QueryParser::default(),
    });

    let results = searcher
        .search(&catalog, "rooms nearby", Some(kathmandu()))
        .unwrap()
        .into_results()
        .unwrap();

    let ids: Vec<i64> = results.iter().map(|p| p.property.id).collect();
    assert_eq!(ids, vec![2, 5, 7]);
}

#[test]
fn test_integration_invalid_radius_fails_fast() {
    let catalog = create_catalog();
    let searcher = Searcher::new(SearchOptions {
        nearby_radius_km: 0.0,
        parser: QueryParser::default(),
    });

    assert!(searcher
        .search(&catalog, "rooms near me", Some(kathmandu()))
        .is_err());
}

#[test]
fn test_integration_invalid_location_requires_location() {
    let catalog = create_catalog();
    let searcher = Searcher::default();

    let outcome = searcher
        .search(&catalog, "rooms near me", Some(Coordinate::new(123.0, 85.0)))
        .unwrap();

    assert!(outcome.is_location_required());
}
