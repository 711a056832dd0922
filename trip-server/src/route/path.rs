//! Route geometry extraction.

use tracing::warn;

use crate::domain::{ApiMode, Coordinate, Plan};
use crate::geometry;

use super::select::select_itinerary;

/// Extract the drawable path for a plan: the concatenation of each
/// leg's decoded geometry, in leg order.
///
/// Failure is local: a leg whose encoded string is malformed
/// contributes nothing and the remaining legs still render. Shared
/// endpoints between adjacent legs are not deduplicated; the seam is
/// invisible at map scale.
pub fn extract_path(plan: &Plan, api_mode: ApiMode) -> Vec<Coordinate> {
    let Some(itinerary) = select_itinerary(&plan.itineraries, api_mode) else {
        return Vec::new();
    };

    let mut coords = Vec::new();

    for (idx, leg) in itinerary.legs.iter().enumerate() {
        let Some(encoded) = &leg.geometry else {
            continue;
        };

        match geometry::decode(encoded) {
            Ok(mut points) => coords.append(&mut points),
            Err(e) => {
                warn!(leg = idx, mode = %leg.mode, %e, "skipping undecodable leg geometry");
            }
        }
    }

    coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Itinerary, Leg, LegMode};
    use crate::geometry::encode;

    fn coords(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
        pairs
            .iter()
            .map(|(lat, lon)| Coordinate::new(*lat, *lon).unwrap())
            .collect()
    }

    fn leg_with_geometry(mode: LegMode, points: &[(f64, f64)]) -> Leg {
        let mut leg = Leg::with_mode(mode);
        leg.geometry = Some(encode(&coords(points)));
        leg
    }

    fn plan_with_legs(legs: Vec<Leg>) -> Plan {
        Plan {
            itineraries: vec![Itinerary {
                duration: 600.0,
                walk_distance: 500.0,
                start_time: 0,
                end_time: 600_000,
                elevation_gained: None,
                elevation_lost: None,
                legs,
            }],
        }
    }

    #[test]
    fn empty_plan_yields_empty_path() {
        let plan = Plan::default();
        assert!(extract_path(&plan, ApiMode::Walk).is_empty());
    }

    #[test]
    fn concatenates_legs_in_order() {
        let plan = plan_with_legs(vec![
            leg_with_geometry(LegMode::Walk, &[(45.18, 5.72), (45.19, 5.73)]),
            leg_with_geometry(LegMode::Bus, &[(45.19, 5.73), (45.21, 5.76)]),
        ]);

        let path = extract_path(&plan, ApiMode::Walk);
        assert_eq!(path.len(), 4);
        // First point of first leg, last point of last leg.
        assert!((path[0].lat() - 45.18).abs() < 1e-5);
        assert!((path[3].lon() - 5.76).abs() < 1e-5);
    }

    #[test]
    fn corrupt_middle_leg_is_isolated() {
        let mut broken = Leg::with_mode(LegMode::Bus);
        // Ends mid-varint: every byte is a continuation chunk.
        broken.geometry = Some("zzzz".to_string());

        let plan = plan_with_legs(vec![
            leg_with_geometry(LegMode::Walk, &[(45.18, 5.72), (45.19, 5.73)]),
            broken,
            leg_with_geometry(LegMode::Walk, &[(45.20, 5.75), (45.21, 5.76)]),
        ]);

        let path = extract_path(&plan, ApiMode::Walk);
        // Legs 1 and 3 contribute two points each; leg 2 contributes none.
        assert_eq!(path.len(), 4);
        assert!((path[1].lat() - 45.19).abs() < 1e-5);
        assert!((path[2].lat() - 45.20).abs() < 1e-5);
    }

    #[test]
    fn legs_without_geometry_are_skipped() {
        let plan = plan_with_legs(vec![
            Leg::with_mode(LegMode::Walk),
            leg_with_geometry(LegMode::Bus, &[(45.19, 5.73), (45.21, 5.76)]),
        ]);

        assert_eq!(extract_path(&plan, ApiMode::Walk).len(), 2);
    }

    #[test]
    fn transit_mode_extracts_from_selected_itinerary() {
        // Walk-only first, transit second: TRANSIT must draw the second.
        let walk_only = plan_with_legs(vec![leg_with_geometry(
            LegMode::Walk,
            &[(1.0, 1.0), (1.1, 1.1)],
        )])
        .itineraries
        .remove(0);

        let transit = plan_with_legs(vec![leg_with_geometry(
            LegMode::Bus,
            &[(2.0, 2.0), (2.1, 2.1), (2.2, 2.2)],
        )])
        .itineraries
        .remove(0);

        let plan = Plan {
            itineraries: vec![walk_only, transit],
        };

        let path = extract_path(&plan, ApiMode::Transit);
        assert_eq!(path.len(), 3);
        assert!((path[0].lat() - 2.0).abs() < 1e-5);
    }
}
