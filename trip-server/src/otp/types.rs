//! Journey-planning backend response DTOs.
//!
//! These types map directly to the OTP-style plan JSON. `Option` is used
//! liberally because the feed omits fields rather than sending nulls,
//! and transit-only fields are simply absent on walk/bike/car legs.

use serde::Deserialize;

/// Top-level response from the `plan` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanResponse {
    /// The plan envelope. Absent when the request itself failed.
    pub plan: Option<PlanDto>,
}

/// Envelope of candidate itineraries for one request.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDto {
    #[serde(default)]
    pub itineraries: Vec<ItineraryDto>,
}

/// One complete trip option.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDto {
    /// Total duration in seconds.
    pub duration: f64,

    /// Itinerary distance in meters. The field name is historical; the
    /// backend uses it for the whole itinerary, not only walking.
    #[serde(default)]
    pub walk_distance: f64,

    /// Departure time, epoch milliseconds.
    pub start_time: i64,

    /// Arrival time, epoch milliseconds.
    pub end_time: i64,

    /// Cumulative climb in meters.
    pub elevation_gained: Option<f64>,

    /// Cumulative descent in meters.
    pub elevation_lost: Option<f64>,

    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// One atomic segment of an itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Mode token: WALK, BUS, TRAM, ...
    pub mode: String,

    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub start_time: i64,

    #[serde(default)]
    pub end_time: i64,

    pub from: Option<PlaceDto>,
    pub to: Option<PlaceDto>,

    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,

    /// Route identifier. Sometimes a code, sometimes empty.
    pub route: Option<String>,

    pub agency_name: Option<String>,
    pub headsign: Option<String>,

    pub leg_geometry: Option<LegGeometryDto>,

    pub transit_leg: Option<bool>,
}

/// Leg endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    pub name: Option<String>,

    /// Stop identifier when this place is a registered stop.
    pub stop_id: Option<String>,

    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Wrapper around the encoded polyline for a leg.
#[derive(Debug, Clone, Deserialize)]
pub struct LegGeometryDto {
    pub points: Option<String>,

    #[serde(default)]
    pub length: Option<u32>,
}
