//! Boarding-point extraction.

use crate::domain::{ApiMode, BoardingPoint, Plan};

use super::select::select_itinerary;

/// Extract one boarding point per continuing leg of the selected
/// itinerary.
///
/// The first leg is excluded by construction: it is the departure
/// itself (typically an initial walk), no mode change has happened yet
/// and there is nothing to mark. Every later leg with a positioned
/// `from` endpoint yields a point - walk legs included; the renderer
/// decides which modes get a distinct pin, and the departure lookup
/// filters to bus/tram on its own.
pub fn extract_boarding_points(plan: &Plan, api_mode: ApiMode) -> Vec<BoardingPoint> {
    let Some(itinerary) = select_itinerary(&plan.itineraries, api_mode) else {
        return Vec::new();
    };

    itinerary
        .legs
        .iter()
        .skip(1)
        .filter_map(BoardingPoint::from_leg)
        .collect()
}
