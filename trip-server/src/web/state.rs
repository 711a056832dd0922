//! Application state for the web layer.

use std::sync::Arc;

use crate::enviro::EnviroClient;
use crate::geocode::GeocodeClient;
use crate::otp::OtpClient;
use crate::pipeline::TripPlanner;
use crate::stops::StopService;

/// The planner composition served in production.
pub type LivePlanner = TripPlanner<Arc<GeocodeClient>, OtpClient, StopService>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Trip planning pipeline.
    pub planner: Arc<LivePlanner>,

    /// Geocoder, exposed directly for the geocode/autocomplete
    /// endpoints. The planner holds the same instance.
    pub geocoder: Arc<GeocodeClient>,

    /// Environmental data pass-throughs.
    pub enviro: Arc<EnviroClient>,
}

impl AppState {
    pub fn new(planner: LivePlanner, geocoder: Arc<GeocodeClient>, enviro: EnviroClient) -> Self {
        Self {
            planner: Arc::new(planner),
            geocoder,
            enviro: Arc::new(enviro),
        }
    }
}
