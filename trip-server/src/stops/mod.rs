//! Stop data: route stop lists, stop code resolution, and real-time
//! departure correlation.

pub mod cache;
pub mod client;
pub mod correlate;
pub mod error;
pub mod lookup;

pub use cache::{RouteStopsCache, StopsCacheConfig};
pub use client::{Pattern, PatternStoptimes, RouteStop, StopTime, StopsClient, StopsClientConfig};
pub use correlate::{
    DepartureBoard, Departure, MatchTier, StopInfoProvider, bus_route_number,
    correlate_boarding_points, departures_for_point,
};
pub use error::StopsError;
pub use lookup::find_stop_code;

use tracing::debug;

/// Live stop data source: HTTP client with a persistent route-stops
/// cache in front of the stop-list endpoint. Departure feeds are
/// real-time and never cached.
pub struct StopService {
    client: StopsClient,
    cache: RouteStopsCache,
}

impl StopService {
    pub fn new(client: StopsClient, cache: RouteStopsCache) -> Self {
        Self { client, cache }
    }

    /// Load the cache snapshot. Call once during startup, before the
    /// service answers queries.
    pub async fn load_cache(&self) -> usize {
        self.cache.load().await
    }

    /// Backend route identifier for a display route code.
    fn route_id(route: &str) -> String {
        format!("SEM:{}", route)
    }
}

impl StopInfoProvider for StopService {
    async fn route_stops(&self, route: &str) -> Result<Vec<RouteStop>, StopsError> {
        let route_id = Self::route_id(route);
        if let Some(cached) = self.cache.get(&route_id).await {
            debug!(%route_id, "route stops served from cache");
            return Ok(cached.as_ref().clone());
        }

        let stops = self.client.fetch_route_stops(&route_id).await?;
        self.cache.insert(&route_id, stops.clone()).await;
        Ok(stops)
    }

    async fn stoptimes(&self, stop_code: &str) -> Result<Vec<PatternStoptimes>, StopsError> {
        self.client.fetch_stoptimes(stop_code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_id_has_agency_prefix() {
        assert_eq!(StopService::route_id("C1"), "SEM:C1");
        assert_eq!(StopService::route_id("A"), "SEM:A");
    }
}
