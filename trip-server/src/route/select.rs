//! Itinerary selection policy.

use tracing::debug;

use crate::domain::{ApiMode, Itinerary};

/// Choose the itinerary to present among the backend's candidates.
///
/// For transit requests the backend may interleave walk-only fallback
/// itineraries with genuine transit ones (transit service can be thin
/// in the requested window), so we scan for the first itinerary that
/// actually rides transit. In every other case - non-transit mode, or
/// transit requested but none available - the first candidate wins.
///
/// Returns `None` only for an empty candidate list.
pub fn select_itinerary(itineraries: &[Itinerary], api_mode: ApiMode) -> Option<&Itinerary> {
    if itineraries.is_empty() {
        return None;
    }

    if api_mode == ApiMode::Transit {
        if let Some(it) = itineraries.iter().find(|it| it.has_transit_segments()) {
            debug!("selected first itinerary with transit segments");
            return Some(it);
        }
        debug!("transit requested but no itinerary rides transit, falling back to first");
    }

    itineraries.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Leg, LegMode};

    fn itinerary(modes: &[LegMode], duration: f64) -> Itinerary {
        Itinerary {
            duration,
            walk_distance: 100.0,
            start_time: 0,
            end_time: (duration * 1000.0) as i64,
            elevation_gained: None,
            elevation_lost: None,
            legs: modes.iter().cloned().map(Leg::with_mode).collect(),
        }
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(select_itinerary(&[], ApiMode::Transit).is_none());
        assert!(select_itinerary(&[], ApiMode::Walk).is_none());
    }

    #[test]
    fn transit_prefers_first_itinerary_with_transit() {
        let candidates = vec![
            itinerary(&[LegMode::Walk], 600.0),
            itinerary(&[LegMode::Walk, LegMode::Bus, LegMode::Walk], 900.0),
            itinerary(&[LegMode::Walk, LegMode::Bus], 800.0),
        ];

        let picked = select_itinerary(&candidates, ApiMode::Transit).unwrap();
        assert_eq!(picked, &candidates[1]);
    }

    #[test]
    fn transit_falls_back_to_first_when_none_qualify() {
        let candidates = vec![
            itinerary(&[LegMode::Walk], 600.0),
            itinerary(&[LegMode::Walk, LegMode::Walk], 700.0),
        ];

        let picked = select_itinerary(&candidates, ApiMode::Transit).unwrap();
        assert_eq!(picked, &candidates[0]);
    }

    #[test]
    fn non_transit_always_takes_first() {
        // Even if a later itinerary contains transit, WALK mode takes
        // the first candidate unconditionally.
        let candidates = vec![
            itinerary(&[LegMode::Walk], 600.0),
            itinerary(&[LegMode::Walk, LegMode::Tram], 500.0),
        ];

        assert_eq!(
            select_itinerary(&candidates, ApiMode::Walk).unwrap(),
            &candidates[0]
        );
        assert_eq!(
            select_itinerary(&candidates, ApiMode::Bicycle).unwrap(),
            &candidates[0]
        );
        assert_eq!(
            select_itinerary(&candidates, ApiMode::Car).unwrap(),
            &candidates[0]
        );
    }

    #[test]
    fn transit_flag_qualifies_without_transit_mode() {
        let mut flagged = itinerary(&[LegMode::Other("SHUTTLE".into())], 400.0);
        flagged.legs[0].transit_leg = true;

        let candidates = vec![itinerary(&[LegMode::Walk], 600.0), flagged.clone()];
        let picked = select_itinerary(&candidates, ApiMode::Transit).unwrap();
        assert_eq!(picked, &flagged);
    }
}
