mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use config::Settings;
use routes::search::AppState;
use services::{CatalogCache, CatalogClient};
use core::{QueryParser, SearchOptions, Searcher};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration error: {}", e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so LOG_LEVEL/LOG_FORMAT flow through settings
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        config_error(e)
    })?;

    // Initialize logging
    let filter = EnvFilter::try_new(&settings.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Griha search service...");
    info!("Configuration loaded successfully");

    // Initialize catalog client
    let timeout_secs = settings.catalog.timeout_secs.unwrap_or(10);
    let catalog = Arc::new(
        CatalogClient::new(settings.catalog.base_url.clone(), timeout_secs).map_err(|e| {
            error!("Failed to build catalog client: {}", e);
            config_error(e)
        })?,
    );

    info!("Catalog client initialized ({}, timeout {}s)", catalog.base_url(), timeout_secs);

    // Initialize snapshot cache
    let cache = Arc::new(CatalogCache::new(settings.cache.capacity, settings.cache.ttl_secs));

    info!(
        "Catalog cache initialized ({} entries, TTL: {}s)",
        settings.cache.capacity,
        cache.ttl_secs()
    );

    // Initialize searcher with configured radius and city list
    let searcher = Searcher::new(SearchOptions {
        nearby_radius_km: settings.search.nearby_radius_km,
        parser: QueryParser::new(settings.search.known_cities.iter()),
    });

    info!(
        "Searcher initialized (nearby radius: {} km, {} known cities)",
        searcher.nearby_radius_km(),
        searcher.parser().cities().len()
    );

    // Build application state
    let app_state = AppState {
        catalog,
        cache,
        searcher,
        page_size: settings.search.page_size,
        max_page_size: settings.search.max_page_size,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
