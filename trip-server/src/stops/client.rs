//! Stop-data HTTP client.
//!
//! Two feeds off the transit index API: the per-route stop list (used
//! to resolve a stop code from a stop name) and the per-stop real-time
//! departure feed.

use serde::{Deserialize, Serialize};

use super::error::StopsError;

/// Default base URL for the transit index API.
const DEFAULT_BASE_URL: &str = "https://data.mobilites-m.fr/api/routers/default/index";

/// A registered stop on a route.
///
/// `Serialize` is derived because these are what the disk snapshot of
/// the route-stops cache persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    /// Registered stop name ("Victor Hugo").
    pub name: String,

    /// Backend stop code used by the departure feed.
    pub gtfs_id: String,
}

/// A group of real-time departures sharing a pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternStoptimes {
    pub pattern: Pattern,

    #[serde(default)]
    pub times: Vec<StopTime>,
}

/// A backend grouping of trips sharing route and direction.
#[derive(Debug, Clone, Deserialize)]
pub struct Pattern {
    /// Opaque pattern identifier, e.g. `SEM:C1:0:010` or `SEM:3903:...`.
    pub id: String,

    /// Human-readable description, usually the destination.
    #[serde(default)]
    pub desc: String,
}

/// One upcoming departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTime {
    /// Midnight of the operating day, epoch seconds.
    pub service_day: i64,

    /// Departure time as seconds after midnight of the service day,
    /// live-updated when realtime data exists.
    pub realtime_departure: u32,

    /// Whether the departure time is realtime or scheduled.
    #[serde(default)]
    pub realtime: bool,
}

/// Configuration for the stop-data client.
#[derive(Debug, Clone)]
pub struct StopsClientConfig {
    /// Base URL for the index API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StopsClientConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for StopsClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the transit index API.
#[derive(Debug, Clone)]
pub struct StopsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StopsClient {
    /// Create a new stop-data client.
    pub fn new(config: StopsClientConfig) -> Result<Self, StopsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the stop list for a route.
    pub async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<RouteStop>, StopsError> {
        let url = format!("{}/routes/{}/stops", self.base_url, route_id);
        let body = self.get_text(&url).await?;

        serde_json::from_str(&body).map_err(|e| StopsError::Json {
            message: e.to_string(),
        })
    }

    /// Fetch the real-time departure feed for a stop code.
    pub async fn fetch_stoptimes(
        &self,
        stop_code: &str,
    ) -> Result<Vec<PatternStoptimes>, StopsError> {
        let url = format!("{}/stops/{}/stoptimes", self.base_url, stop_code);
        let body = self.get_text(&url).await?;

        serde_json::from_str(&body).map_err(|e| StopsError::Json {
            message: e.to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, StopsError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StopsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
