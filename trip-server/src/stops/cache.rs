//! Route→stops cache with disk persistence.
//!
//! The per-route stop list is effectively static data that the stop
//! code lookup hits on every transit itinerary, so entries are cached
//! in memory and snapshotted to disk across restarts.
//!
//! The cache is constructed and loaded explicitly during startup -
//! callers hold a fully-initialized value before the first query, so
//! there is no "still loading" state to race against.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use moka::future::Cache as MokaCache;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::client::RouteStop;
use super::error::StopsError;

/// Default snapshot TTL: 7 days. Stop lists change with timetable
/// updates, not daily.
const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Serialized snapshot with freshness metadata.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    /// Unix timestamp when the snapshot was written.
    cached_at_secs: u64,
    /// Stop lists keyed by route identifier.
    routes: HashMap<String, Vec<RouteStop>>,
}

/// Configuration for the route-stops cache.
#[derive(Debug, Clone)]
pub struct StopsCacheConfig {
    /// Path to the snapshot file.
    pub path: PathBuf,
    /// How long the snapshot remains valid.
    pub ttl: Duration,
    /// Maximum number of in-memory entries.
    pub max_capacity: u64,
}

impl StopsCacheConfig {
    /// Create a cache config with the given path and default TTL.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
            max_capacity: 500,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StopsCacheConfig {
    fn default() -> Self {
        Self::new("route_stops_cache.json")
    }
}

/// In-memory route→stops cache backed by a disk snapshot.
///
/// Entries are immutable once cached, so reads go through the lock-free
/// in-memory layer; inserts serialize through the snapshot lock, which
/// also covers the disk write.
pub struct RouteStopsCache {
    memory: MokaCache<String, Arc<Vec<RouteStop>>>,
    snapshot: RwLock<HashMap<String, Vec<RouteStop>>>,
    config: StopsCacheConfig,
}

impl RouteStopsCache {
    /// Create an empty cache with the given configuration.
    pub fn new(config: StopsCacheConfig) -> Self {
        let memory = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self {
            memory,
            snapshot: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Load the disk snapshot if present and fresh.
    ///
    /// Returns the number of routes loaded. A missing, stale, or
    /// unreadable snapshot loads nothing - the cache just starts cold.
    pub async fn load(&self) -> usize {
        let Some(routes) = self.read_snapshot() else {
            info!("no usable route-stops snapshot, starting with empty cache");
            return 0;
        };

        let count = routes.len();
        let mut guard = self.snapshot.write().await;
        for (route_id, stops) in &routes {
            self.memory
                .insert(route_id.clone(), Arc::new(stops.clone()))
                .await;
        }
        *guard = routes;

        info!(routes = count, "loaded route-stops snapshot");
        count
    }

    /// Get the cached stop list for a route.
    pub async fn get(&self, route_id: &str) -> Option<Arc<Vec<RouteStop>>> {
        self.memory.get(route_id).await
    }

    /// Insert a stop list and persist the snapshot.
    ///
    /// A failed disk write is logged and swallowed: persistence is an
    /// optimization, the in-memory entry is already live.
    pub async fn insert(&self, route_id: &str, stops: Vec<RouteStop>) {
        self.memory
            .insert(route_id.to_string(), Arc::new(stops.clone()))
            .await;

        let mut guard = self.snapshot.write().await;
        guard.insert(route_id.to_string(), stops);
        if let Err(e) = self.write_snapshot(&guard) {
            warn!(%e, "failed to persist route-stops snapshot");
        }
    }

    /// Number of routes in the in-memory cache.
    pub fn entry_count(&self) -> u64 {
        self.memory.entry_count()
    }

    fn read_snapshot(&self) -> Option<HashMap<String, Vec<RouteStop>>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let snapshot: Snapshot = serde_json::from_str(&contents).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(snapshot.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(snapshot.routes)
    }

    fn write_snapshot(&self, routes: &HashMap<String, Vec<RouteStop>>) -> Result<(), StopsError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| StopsError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let snapshot = Snapshot {
            cached_at_secs: now,
            routes: routes.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StopsError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&snapshot).map_err(|e| StopsError::Cache {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| StopsError::Cache {
            message: format!("failed to write snapshot file: {}", e),
        })
    }
}
