//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BoardingPoint, Coordinate};
use crate::pipeline::{ModeSummary, PlannedTrip};
use crate::stops::DepartureBoard;

/// Request to geocode a place name or fetch suggestions.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub candidates: Vec<AutocompleteCandidate>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteCandidate {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    pub origin: String,
    pub destination: String,

    /// UI mode name: walking, bicycle, bus, or car. Unrecognized
    /// values plan a walking trip.
    #[serde(default)]
    pub mode: String,

    #[serde(default)]
    pub wheelchair: bool,

    /// Walking speed in m/s.
    pub walk_speed: Option<f64>,

    /// Cycling speed in m/s.
    pub bike_speed: Option<f64>,

    #[serde(default)]
    pub safe_route: bool,

    /// Requested departure, ISO-8601 without timezone
    /// (`2024-05-01T08:30:00`).
    pub depart_at: Option<String>,
}

/// A planned trip, ready to render.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// Pass back to the departures endpoint.
    pub generation: u64,
    pub mode: String,
    pub duration_secs: f64,
    pub distance_m: f64,
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub path: Vec<PointDto>,
    pub boarding_points: Vec<BoardingPoint>,
}

#[derive(Debug, Serialize)]
pub struct PointDto {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for PointDto {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lon: c.lon(),
        }
    }
}

impl From<PlannedTrip> for PlanTripResponse {
    fn from(trip: PlannedTrip) -> Self {
        Self {
            generation: trip.generation,
            mode: trip.mode.as_str().to_string(),
            duration_secs: trip.itinerary.duration,
            distance_m: trip.itinerary.walk_distance,
            start_time_ms: trip.itinerary.start_time,
            end_time_ms: trip.itinerary.end_time,
            path: trip.path.into_iter().map(PointDto::from).collect(),
            boarding_points: trip.boarding_points,
        }
    }
}

/// Request for departure boards, echoing a trip's boarding points.
#[derive(Debug, Deserialize)]
pub struct DeparturesRequest {
    pub generation: u64,
    pub boarding_points: Vec<BoardingPoint>,
}

#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    /// Index-aligned with the request's boarding points; `null` where
    /// no schedule is available.
    pub boards: Vec<Option<DepartureBoard>>,
}

/// Request to compare modes between two resolved coordinates.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub modes: Vec<ModeSummary>,
}

/// Coordinate query for the weather and air quality endpoints.
#[derive(Debug, Deserialize)]
pub struct CoordQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct Co2Query {
    pub distance: f64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
