//! Conversion from backend DTOs to domain types.
//!
//! One malformed leg field must not take down the whole plan: endpoint
//! coordinates that fail validation become `None`, and legs keep their
//! raw geometry string for the path extractor to decode (and isolate)
//! later.

use tracing::warn;

use crate::domain::{Coordinate, Itinerary, Leg, LegMode, Place, Plan};

use super::types::{ItineraryDto, LegDto, PlaceDto, PlanResponse};

/// Convert a plan response into the domain model.
///
/// A response without a `plan` envelope (the backend's "no trip found"
/// shape) converts to an empty plan rather than an error.
pub fn convert_plan(response: &PlanResponse) -> Plan {
    let Some(plan) = &response.plan else {
        return Plan::default();
    };

    Plan {
        itineraries: plan.itineraries.iter().map(convert_itinerary).collect(),
    }
}

fn convert_itinerary(dto: &ItineraryDto) -> Itinerary {
    Itinerary {
        duration: dto.duration,
        walk_distance: dto.walk_distance,
        start_time: dto.start_time,
        end_time: dto.end_time,
        elevation_gained: dto.elevation_gained,
        elevation_lost: dto.elevation_lost,
        legs: dto.legs.iter().map(convert_leg).collect(),
    }
}

fn convert_leg(dto: &LegDto) -> Leg {
    Leg {
        mode: LegMode::parse(&dto.mode),
        distance: dto.distance,
        duration: dto.duration,
        start_time: dto.start_time,
        end_time: dto.end_time,
        from: convert_place(dto.from.as_ref()),
        to: convert_place(dto.to.as_ref()),
        route_short_name: dto.route_short_name.clone(),
        route_long_name: dto.route_long_name.clone(),
        route: none_if_empty(dto.route.clone()),
        agency_name: dto.agency_name.clone(),
        headsign: dto.headsign.clone(),
        geometry: dto
            .leg_geometry
            .as_ref()
            .and_then(|g| g.points.clone()),
        transit_leg: dto.transit_leg.unwrap_or(false),
    }
}

fn convert_place(dto: Option<&PlaceDto>) -> Place {
    let Some(dto) = dto else {
        return Place::named("");
    };

    let coord = match (dto.lat, dto.lon) {
        (Some(lat), Some(lon)) => match Coordinate::new(lat, lon) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(lat, lon, %e, "dropping out-of-range place coordinate");
                None
            }
        },
        _ => None,
    };

    Place {
        name: dto.name.clone().unwrap_or_default(),
        stop_id: dto.stop_id.clone(),
        coord,
    }
}

/// The feed sometimes sends `"route": ""` on transit legs; treat that
/// as absent so the route-info precedence doesn't pick up an empty code.
fn none_if_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}
