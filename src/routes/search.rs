use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{paginate, summarize, SearchOutcome, Searcher};
use crate::models::{
    Coordinate, ErrorResponse, HealthResponse, MapRequest, MapResponse, ParseQueryRequest,
    ParseQueryResponse, ParsedQuery, PropertyRecord, SearchRequest, SearchResponse, SearchStatus,
};
use crate::services::{CacheError, CacheKey, CatalogCache, CatalogClient, CatalogError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub cache: Arc<CatalogCache>,
    pub searcher: Searcher,
    pub page_size: usize,
    pub max_page_size: usize,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/query/parse", web::post().to(parse_query))
        .route("/search", web::post().to(search))
        .route("/map", web::post().to(map_browse))
        .route("/cache/invalidate", web::post().to(invalidate_cache));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.cache.stats();
    tracing::trace!("Health check, {} cached snapshots", stats.entry_count);

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Parse query endpoint
///
/// POST /api/v1/query/parse
///
/// Request body:
/// ```json
/// { "query": "2bhk apartments in Kathmandu under 30k" }
/// ```
async fn parse_query(
    state: web::Data<AppState>,
    req: web::Json<ParseQueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let parsed = state.searcher.parser().parse(&req.query);
    let summary = summarize(&parsed);

    HttpResponse::Ok().json(ParseQueryResponse { parsed, summary })
}

/// Search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "query": "rooms near me under 15000",
///   "latitude": 27.7172,
///   "longitude": 85.3240,
///   "page": 1,
///   "pageSize": 6,
///   "verifiedOnly": false,
///   "cities": ["Kathmandu"],
///   "types": ["ROOM"],
///   "maxPrice": 20000
/// }
/// ```
///
/// The filter panel fields are optional and narrow the parsed query further.
///
/// A nearby query without a position answers `status: "location_required"`
/// so the client can ask for location access and retry.
async fn search(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let current_location = req.current_location();
    let parsed = state.searcher.parser().parse(&req.query);

    tracing::info!("[{}] Searching for '{}'", request_id, req.query);

    // No point fetching a snapshot that can't be searched without a position
    let needs_location = parsed.nearby_intent && current_location.filter(Coordinate::is_valid).is_none();

    let properties = if needs_location {
        Vec::new()
    } else {
        match load_catalog(&state, &parsed).await {
            Ok(properties) => properties,
            Err(e) => {
                tracing::error!("[{}] Failed to load catalog: {}", request_id, e);
                return HttpResponse::BadGateway().json(ErrorResponse {
                    error: "Failed to load properties".to_string(),
                    message: e.to_string(),
                    status_code: 502,
                });
            }
        }
    };

    let outcome = state
        .searcher
        .search_filtered(&properties, parsed, &req.filters, current_location);

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("[{}] Search rejected: {}", request_id, e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid search".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let summary = summarize(outcome.parsed());

    let response = match outcome {
        SearchOutcome::LocationRequired { parsed } => {
            tracing::info!("[{}] Location required for nearby search", request_id);
            SearchResponse {
                request_id,
                status: SearchStatus::LocationRequired,
                summary,
                parsed,
                results: Vec::new(),
                page: req.page,
                total_pages: 0,
                total_results: 0,
            }
        }
        SearchOutcome::Results { parsed, results } => {
            let page_size = req
                .page_size
                .unwrap_or(state.page_size)
                .min(state.max_page_size);
            let page = paginate(results, req.page, page_size);

            tracing::info!(
                "[{}] Returning {} of {} results (page {}/{})",
                request_id,
                page.items.len(),
                page.total_results,
                page.page,
                page.total_pages
            );

            SearchResponse {
                request_id,
                status: SearchStatus::Ok,
                summary,
                parsed,
                results: page.items,
                page: page.page,
                total_pages: page.total_pages,
                total_results: page.total_results,
            }
        }
    };

    HttpResponse::Ok().json(response)
}

/// Map browse endpoint
///
/// POST /api/v1/map
///
/// Lists every property that can be placed on the map, with distances when
/// `latitude`/`longitude` are given. Accepts the same filter panel fields as search.
async fn map_browse(
    state: web::Data<AppState>,
    req: web::Json<MapRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request_id = uuid::Uuid::new_v4().to_string();

    let properties = match load_catalog(&state, &ParsedQuery::empty("")).await {
        Ok(properties) => properties,
        Err(e) => {
            tracing::error!("[{}] Failed to load catalog: {}", request_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to load properties".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let results = state
        .searcher
        .browse(&properties, &req.filters, req.current_location());

    tracing::info!("[{}] Map browse returning {} properties", request_id, results.len());

    HttpResponse::Ok().json(MapResponse {
        request_id,
        total_results: results.len(),
        results,
    })
}

/// Drop every cached catalog snapshot
///
/// POST /api/v1/cache/invalidate
async fn invalidate_cache(state: web::Data<AppState>) -> impl Responder {
    state.cache.invalidate_all();
    tracing::info!("Catalog cache invalidated (TTL: {}s)", state.cache.ttl_secs());

    HttpResponse::Ok().json(state.cache.stats())
}

/// Catalog snapshot for a query, served from cache when possible
async fn load_catalog(
    state: &AppState,
    parsed: &ParsedQuery,
) -> Result<Vec<PropertyRecord>, CatalogError> {
    let cache_key = CacheKey::catalog(parsed);

    match state.cache.get::<Vec<PropertyRecord>>(&cache_key).await {
        Ok(properties) => return Ok(properties),
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Discarding unreadable cache entry {}: {}", cache_key, e),
    }

    let properties = state.catalog.search_properties(parsed).await?;

    if let Err(e) = state.cache.set(&cache_key, &properties).await {
        tracing::warn!("Failed to cache catalog snapshot: {}", e);
    }

    Ok(properties)
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
