use crate::models::{ParsedQuery, PropertyRecord};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the catalog backend
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the property catalog backend
///
/// Fetches property snapshots from `GET {base_url}/properties/search`,
/// forwarding whichever filters the parsed query carries so the backend can
/// narrow the snapshot before it is searched locally.
pub struct CatalogClient {
    base_url: String,
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the search URL for a parsed query
    pub fn search_url(&self, parsed: &ParsedQuery) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();

        if let Some(city) = &parsed.city {
            params.push(("city", city.clone()));
        }
        if let Some(min_price) = parsed.min_price {
            params.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = parsed.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }
        // The backend names this parameter `type`
        if let Some(category) = parsed.category {
            params.push(("type", category.as_str().to_string()));
        }
        if let Some(min_bedrooms) = parsed.min_bedrooms {
            params.push(("minBedrooms", min_bedrooms.to_string()));
        }

        let url = format!("{}/properties/search", self.base_url.trim_end_matches('/'));

        if params.is_empty() {
            return url;
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", url, query)
    }

    /// Fetch the properties matching the catalog-side filters of a parsed query
    ///
    /// Records that fail to deserialize are skipped rather than failing the whole fetch.
    pub async fn search_properties(
        &self,
        parsed: &ParsedQuery,
    ) -> Result<Vec<PropertyRecord>, CatalogError> {
        let url = self.search_url(parsed);

        tracing::debug!("Fetching catalog snapshot from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Catalog search failed: {} - {}", status, body);
            return Err(CatalogError::ApiError(format!(
                "Failed to search properties: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .as_array()
            .ok_or_else(|| CatalogError::InvalidResponse("Expected an array of properties".into()))?;

        let properties: Vec<PropertyRecord> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value(doc.clone()) {
                Ok(property) => Some(property),
                Err(e) => {
                    tracing::debug!("Skipping malformed property record: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Fetched {} properties ({} records returned)",
            properties.len(),
            documents.len()
        );

        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyCategory;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:8081/api/".to_string(), 5).unwrap()
    }

    #[test]
    fn test_catalog_client_creation() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:8081/api/");
    }

    #[test]
    fn test_search_url_without_filters() {
        let url = client().search_url(&ParsedQuery::empty("anything"));
        assert_eq!(url, "http://localhost:8081/api/properties/search");
    }

    #[test]
    fn test_search_url_with_filters() {
        let mut parsed = ParsedQuery::empty("2 bed flats in Pokhara 10000 to 20000");
        parsed.city = Some("Pokhara".to_string());
        parsed.category = Some(PropertyCategory::Flat);
        parsed.min_price = Some(10000);
        parsed.max_price = Some(20000);
        parsed.min_bedrooms = Some(2);

        let url = client().search_url(&parsed);
        assert_eq!(
            url,
            "http://localhost:8081/api/properties/search?city=Pokhara&minPrice=10000&maxPrice=20000&type=FLAT&minBedrooms=2"
        );
    }

    #[test]
    fn test_search_url_encodes_values() {
        let mut parsed = ParsedQuery::empty("");
        parsed.city = Some("New Baneshwor".to_string());

        let url = client().search_url(&parsed);
        assert!(url.ends_with("?city=New%20Baneshwor"));
    }
}
