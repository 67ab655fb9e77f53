use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::ParsedQuery;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process cache for catalog snapshots
///
/// Entries are stored as JSON bytes and expire after the configured TTL.
/// The cache is owned by the service and passed in explicitly, never global.
pub struct CatalogCache {
    entries: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CatalogCache {
    /// Create a new cache holding at most `capacity` snapshots
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Get a value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.entries.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in the cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a single entry
    pub async fn delete(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Drop every cached snapshot
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
        tracing::debug!("Invalidated all catalog snapshots");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a catalog snapshot, built only from the filters forwarded to the backend
    pub fn catalog(parsed: &ParsedQuery) -> String {
        fn part<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        format!(
            "catalog:{}:{}:{}:{}:{}",
            part(parsed.city.as_deref().map(str::to_lowercase)),
            part(parsed.category.map(|c| c.as_str())),
            part(parsed.min_price),
            part(parsed.max_price),
            part(parsed.min_bedrooms),
        )
    }
}
