use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use trip_server::enviro::{EnviroClient, EnviroConfig};
use trip_server::geocode::{GeocodeClient, GeocodeConfig};
use trip_server::otp::{OtpClient, OtpConfig};
use trip_server::pipeline::TripPlanner;
use trip_server::stops::{RouteStopsCache, StopService, StopsCacheConfig, StopsClient, StopsClientConfig};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut otp_config = OtpConfig::new();
    if let Ok(url) = std::env::var("TRIP_OTP_BASE_URL") {
        otp_config = otp_config.with_base_url(url);
    }
    let otp_client = OtpClient::new(otp_config).expect("Failed to create planning client");

    let mut stops_config = StopsClientConfig::new();
    if let Ok(url) = std::env::var("TRIP_STOPS_BASE_URL") {
        stops_config = stops_config.with_base_url(url);
    }
    let stops_client = StopsClient::new(stops_config).expect("Failed to create stops client");

    let cache_path = std::env::var("TRIP_STOPS_CACHE_PATH")
        .unwrap_or_else(|_| "route_stops_cache.json".to_string());
    let cache = RouteStopsCache::new(StopsCacheConfig::new(cache_path));

    // Load the cache before the service answers queries.
    let stop_service = StopService::new(stops_client, cache);
    let loaded = stop_service.load_cache().await;
    info!(routes = loaded, "route-stops cache ready");

    let http = reqwest::Client::new();
    let geocoder = Arc::new(GeocodeClient::new(http.clone(), GeocodeConfig::new()));
    let enviro = EnviroClient::new(http, EnviroConfig::new());

    let planner = TripPlanner::new(geocoder.clone(), otp_client, stop_service);
    let state = AppState::new(planner, geocoder, enviro);
    let app = create_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Trip planning service listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
