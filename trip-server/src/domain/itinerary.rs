//! Itinerary and plan types.

use super::Leg;

/// One complete proposed trip between origin and destination.
///
/// The backend guarantees legs are temporally and spatially contiguous;
/// we trust that rather than re-validating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Total duration in seconds.
    pub duration: f64,

    /// Despite the name this is the backend's generic itinerary
    /// distance in meters, not only the walked portion.
    pub walk_distance: f64,

    /// Departure time, epoch milliseconds.
    pub start_time: i64,

    /// Arrival time, epoch milliseconds.
    pub end_time: i64,

    /// Cumulative climb in meters, for walk/bike itineraries.
    pub elevation_gained: Option<f64>,

    /// Cumulative descent in meters.
    pub elevation_lost: Option<f64>,

    pub legs: Vec<Leg>,
}

impl Itinerary {
    /// True iff at least one leg actually rides public transit.
    ///
    /// Backends return walk-only fallback itineraries interleaved with
    /// genuine transit ones when service is thin; selection uses this to
    /// tell them apart.
    pub fn has_transit_segments(&self) -> bool {
        self.legs.iter().any(Leg::is_transit)
    }
}

/// The backend response envelope: candidate itineraries for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub itineraries: Vec<Itinerary>,
}
