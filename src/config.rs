use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::{pagination::DEFAULT_PAGE_SIZE, search::DEFAULT_NEARBY_RADIUS_KM, KNOWN_CITIES};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8090 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 60 }
fn default_cache_capacity() -> u64 { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_km: f64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_known_cities")]
    pub known_cities: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            nearby_radius_km: default_nearby_radius(),
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            known_cities: default_known_cities(),
        }
    }
}

fn default_nearby_radius() -> f64 { DEFAULT_NEARBY_RADIUS_KM }
fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }
fn default_max_page_size() -> usize { 100 }
fn default_known_cities() -> Vec<String> {
    KNOWN_CITIES.iter().map(|city| city.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GRIHA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GRIHA__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("GRIHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the conventional un-prefixed variables shared with the web client
///
/// `API_URL` points at the catalog backend; `LOG_LEVEL` and `LOG_FORMAT` control logging.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_url) = env::var("API_URL") {
        builder = builder.set_override("catalog.base_url", api_url)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_settings() {
        let search = SearchSettings::default();
        assert_eq!(search.nearby_radius_km, 5.0);
        assert_eq!(search.page_size, 6);
        assert_eq!(search.max_page_size, 100);
        assert_eq!(search.known_cities.len(), 7);
        assert_eq!(search.known_cities[0], "kathmandu");
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_shipped_config_file_parses() {
        let raw = include_str!("../config/default.toml");
        let settings: Settings = toml::from_str(raw).expect("config/default.toml should deserialize");

        assert_eq!(settings.catalog.base_url, "http://localhost:8081/api");
        assert_eq!(settings.search.nearby_radius_km, 5.0);
        assert_eq!(settings.server.port, 8090);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [catalog]
            base_url = "http://catalog.test/api"
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.cache.ttl_secs, 60);
        assert_eq!(settings.logging.format, "json");
        assert!(settings.catalog.timeout_secs.is_none());
    }
}
