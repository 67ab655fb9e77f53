use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{ParsedQuery, PropertyCategory};

/// Cities recognized when no list is configured
pub const KNOWN_CITIES: [&str; 7] = [
    "kathmandu",
    "pokhara",
    "lalitpur",
    "bhaktapur",
    "patan",
    "biratnagar",
    "birgunj",
];

/// Keyword table for categories, checked in order
const CATEGORY_KEYWORDS: [(&str, PropertyCategory); 8] = [
    ("room", PropertyCategory::Room),
    ("rooms", PropertyCategory::Room),
    ("apartment", PropertyCategory::Apartment),
    ("apartments", PropertyCategory::Apartment),
    ("flat", PropertyCategory::Flat),
    ("flats", PropertyCategory::Flat),
    ("house", PropertyCategory::House),
    ("houses", PropertyCategory::House),
];

const NEARBY_KEYWORDS: [&str; 8] = [
    "nearby",
    "near",
    "close",
    "closest",
    "nearest",
    "around",
    "near me",
    "near my location",
];

const WORD_NUMBERS: [(&str, u32); 5] = [("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5)];

static THOUSANDS_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)k").unwrap());
static THOUSANDS_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*thousand").unwrap());
static UNDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:under|below|less than)\s*(\d+)").unwrap());
static ABOVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:above|more than|over)\s*(\d+)").unwrap());
static RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:between\s*)?(\d+)\s*(?:to|-|and)\s*(\d+)").unwrap());
static BEDROOM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:bedroom|bed|br|bhk)").unwrap());

static DEFAULT_PARSER: Lazy<QueryParser> = Lazy::new(QueryParser::default);

/// Price bounds pulled from a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PriceBounds {
    min: Option<u64>,
    max: Option<u64>,
}

/// Keyword and pattern driven parser for typed or transcribed search queries
///
/// Parsing is deterministic and case-insensitive. Every extractor runs
/// independently, so a single query can yield a city, a category, a price
/// bound, a bedroom count and nearby intent at once.
#[derive(Debug, Clone)]
pub struct QueryParser {
    cities: Vec<String>,
}

impl QueryParser {
    /// Create a parser that recognizes the given city names
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cities = cities
            .into_iter()
            .map(|city| city.as_ref().trim().to_lowercase())
            .filter(|city| !city.is_empty())
            .collect();

        Self { cities }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Parse a raw query into structured filters. Never fails.
    pub fn parse(&self, raw_query: &str) -> ParsedQuery {
        let mut parsed = ParsedQuery::empty(raw_query);

        if raw_query.trim().is_empty() {
            return parsed;
        }

        let lower = raw_query.to_lowercase();

        parsed.city = self.extract_city(&lower);
        parsed.category = extract_category(&lower);

        let price = extract_price(&lower);
        parsed.min_price = price.min;
        parsed.max_price = price.max;

        parsed.min_bedrooms = extract_bedrooms(&lower);

        if NEARBY_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            parsed.nearby_intent = true;
            parsed.use_current_location = lower.contains("near me") || lower.contains("my location");
        }

        parsed
    }

    fn extract_city(&self, lower: &str) -> Option<String> {
        self.cities
            .iter()
            .find(|city| lower.contains(city.as_str()))
            .map(|city| capitalize(city))
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(KNOWN_CITIES)
    }
}

/// Parse with the default city list
pub fn parse_query(raw_query: &str) -> ParsedQuery {
    DEFAULT_PARSER.parse(raw_query)
}

/// Human-readable echo of what was understood, e.g. "flat 2 bedroom in Pokhara under Rs. 25,000"
pub fn summarize(parsed: &ParsedQuery) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(category) = parsed.category {
        parts.push(category.as_str().to_lowercase());
    }
    if let Some(bedrooms) = parsed.min_bedrooms {
        parts.push(format!("{} bedroom", bedrooms));
    }
    if parsed.nearby_intent {
        parts.push("nearby".to_string());
    }
    if let Some(city) = &parsed.city {
        parts.push(format!("in {}", city));
    }
    if let Some(max) = parsed.max_price {
        parts.push(format!("under Rs. {}", group_thousands(max)));
    } else if let Some(min) = parsed.min_price {
        parts.push(format!("above Rs. {}", group_thousands(min)));
    }

    if parts.is_empty() {
        "all properties".to_string()
    } else {
        parts.join(" ")
    }
}

/// First category keyword, in table order, that appears as a whole word
fn extract_category(lower: &str) -> Option<PropertyCategory> {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| words.contains(keyword))
        .map(|(_, category)| *category)
}

/// Only the first matching pattern applies: under, then above, then range.
/// A matched pattern whose number doesn't fit yields no bounds at all.
fn extract_price(lower: &str) -> PriceBounds {
    let normalized = expand_thousands(lower);

    if let Some(caps) = UNDER_PATTERN.captures(&normalized) {
        return PriceBounds { min: None, max: caps[1].parse::<u64>().ok() };
    }

    if let Some(caps) = ABOVE_PATTERN.captures(&normalized) {
        return PriceBounds { min: caps[1].parse::<u64>().ok(), max: None };
    }

    if let Some(caps) = RANGE_PATTERN.captures(&normalized) {
        let low = caps[1].parse::<u64>().ok();
        let high = caps[2].parse::<u64>().ok();
        if let (Some(low), Some(high)) = (low, high) {
            // Inverted ranges are swapped so min never exceeds max
            let (min, max) = if low <= high { (low, high) } else { (high, low) };
            return PriceBounds { min: Some(min), max: Some(max) };
        }
    }

    PriceBounds::default()
}

fn extract_bedrooms(lower: &str) -> Option<u32> {
    if let Some(bedrooms) = BEDROOM_PATTERN
        .captures(lower)
        .and_then(|caps| caps[1].parse::<u32>().ok())
    {
        return Some(bedrooms);
    }

    WORD_NUMBERS
        .iter()
        .find(|(word, _)| lower.contains(&format!("{} bed", word)))
        .map(|(_, count)| *count)
}

/// Rewrite "25k" and "25 thousand" as "25000"
fn expand_thousands(lower: &str) -> String {
    let times_thousand = |caps: &Captures| -> String {
        caps[1]
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(1000))
            .map(|n| n.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    };

    let expanded = THOUSANDS_SUFFIX.replace_all(lower, times_thousand);
    THOUSANDS_WORD.replace_all(&expanded, times_thousand).into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 30000 -> "30,000"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
