//! Itinerary leg and place types.

use super::{Coordinate, LegMode};

/// An endpoint of a leg: a named location, possibly a registered stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Human-readable name ("Victor Hugo", "Origin", ...).
    pub name: String,

    /// Backend stop identifier, present when this place is a transit stop.
    pub stop_id: Option<String>,

    /// Position, when the backend reported one.
    pub coord: Option<Coordinate>,
}

impl Place {
    /// A place with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Place {
            name: name.into(),
            stop_id: None,
            coord: None,
        }
    }
}

/// One uninterrupted segment of an itinerary in a single transport mode.
///
/// Times are epoch milliseconds as reported by the backend. The route
/// fields are all optional because only transit legs carry them, and
/// even then the backend is inconsistent about which ones it fills in.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub mode: LegMode,

    /// Distance in meters.
    pub distance: f64,

    /// Duration in seconds.
    pub duration: f64,

    /// Departure time, epoch milliseconds.
    pub start_time: i64,

    /// Arrival time, epoch milliseconds.
    pub end_time: i64,

    pub from: Place,
    pub to: Place,

    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub route: Option<String>,
    pub agency_name: Option<String>,
    pub headsign: Option<String>,

    /// Encoded polyline for this leg's path, when the backend sent one.
    pub geometry: Option<String>,

    /// Backend's own transit flag. Some feeds set this instead of (or in
    /// addition to) using a transit mode token.
    pub transit_leg: bool,
}

impl Leg {
    /// A minimal leg for the given mode, endpoints unnamed. Mostly
    /// useful as a starting point in tests.
    pub fn with_mode(mode: LegMode) -> Self {
        Leg {
            mode,
            distance: 0.0,
            duration: 0.0,
            start_time: 0,
            end_time: 0,
            from: Place::named(""),
            to: Place::named(""),
            route_short_name: None,
            route_long_name: None,
            route: None,
            agency_name: None,
            headsign: None,
            geometry: None,
            transit_leg: false,
        }
    }

    /// True if this leg rides a transit vehicle, either by mode or by
    /// the backend's explicit flag.
    pub fn is_transit(&self) -> bool {
        self.mode.is_transit() || self.transit_leg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_by_mode() {
        assert!(Leg::with_mode(LegMode::Bus).is_transit());
        assert!(!Leg::with_mode(LegMode::Walk).is_transit());
    }

    #[test]
    fn transit_by_flag() {
        // A leg with an unknown mode but the explicit flag still counts.
        let mut leg = Leg::with_mode(LegMode::Other("SHUTTLE".into()));
        assert!(!leg.is_transit());
        leg.transit_leg = true;
        assert!(leg.is_transit());
    }
}
