use serde::{Deserialize, Serialize};
use crate::models::domain::{AnnotatedProperty, ParsedQuery};

/// Outcome status of a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Ok,
    LocationRequired,
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub status: SearchStatus,
    pub summary: String,
    pub parsed: ParsedQuery,
    pub results: Vec<AnnotatedProperty>,
    pub page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the map browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub results: Vec<AnnotatedProperty>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the query parse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseQueryResponse {
    pub parsed: ParsedQuery,
    pub summary: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
