//! Transit boarding points.
//!
//! A boarding point is a derived marker for where the traveler begins a
//! new leg: the map pins the position, and the real-time departure
//! lookup keys off the route and stop name. These are built fresh for
//! every selected itinerary and never persisted.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Leg, LegMode};

/// Fixed display colors for the city's five tram lines.
const TRAM_COLORS: [(char, &str); 5] = [
    ('A', "#3376B8"),
    ('B', "#479A45"),
    ('C', "#C20078"),
    ('D', "#DE9917"),
    ('E', "#533786"),
];

/// A derived marker for the start of a continuing leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardingPoint {
    pub coord: Coordinate,

    /// Mode token of the originating leg.
    pub mode: String,

    /// Short display code for the route ("C1", "B", "40", ...).
    pub route: String,

    pub agency_name: String,

    /// Name of the stop the leg departs from.
    pub stop_name: String,

    /// Display color. Assigned for tram lines A-E, otherwise empty.
    pub color: String,

    pub headsign: String,
}

impl BoardingPoint {
    /// Build a boarding point from a leg, if the leg's `from` place has
    /// a position. Applies the route-info precedence and tram coloring.
    pub fn from_leg(leg: &Leg) -> Option<Self> {
        let coord = leg.from.coord?;
        let (route, color) = route_display(leg);

        Some(BoardingPoint {
            coord,
            mode: leg.mode.as_str().to_string(),
            route,
            agency_name: leg.agency_name.clone().unwrap_or_default(),
            stop_name: leg.from.name.clone(),
            color,
            headsign: leg.headsign.clone().unwrap_or_default(),
        })
    }

    /// Whether this point should get a real-time departure lookup.
    pub fn wants_departures(&self) -> bool {
        matches!(LegMode::parse(&self.mode), LegMode::Bus | LegMode::Tram)
    }
}

/// Derive the display route code and color for a leg.
///
/// Precedence is last-write-wins over (routeLongName, route,
/// routeShortName), i.e. routeShortName beats route beats routeLongName
/// when several are present. Kept as literal overwrite order because the
/// feeds disagree on which field carries the useful code.
fn route_display(leg: &Leg) -> (String, String) {
    let mut route = String::new();
    if let Some(long) = &leg.route_long_name {
        route = long.clone();
    }
    if let Some(r) = &leg.route {
        route = r.clone();
    }
    if let Some(short) = &leg.route_short_name {
        route = short.clone();
    }

    match tram_color(&route) {
        Some((letter, color)) => (letter.to_string(), color.to_string()),
        None => (route, String::new()),
    }
}

/// Look up the tram color for a route code.
///
/// Matches a single letter A-E case-insensitively; returns the
/// uppercased letter and its color.
pub fn tram_color(route: &str) -> Option<(char, &'static str)> {
    let mut chars = route.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let upper = c.to_ascii_uppercase();
    TRAM_COLORS
        .iter()
        .find(|(letter, _)| *letter == upper)
        .map(|(letter, color)| (*letter, *color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Place;

    fn leg_at(lat: f64, lon: f64) -> Leg {
        let mut leg = Leg::with_mode(LegMode::Bus);
        leg.from = Place {
            name: "StopX".into(),
            stop_id: Some("SEM:1234".into()),
            coord: Some(Coordinate::new(lat, lon).unwrap()),
        };
        leg
    }

    #[test]
    fn tram_color_table() {
        assert_eq!(tram_color("A"), Some(('A', "#3376B8")));
        assert_eq!(tram_color("b"), Some(('B', "#479A45")));
        assert_eq!(tram_color("c"), Some(('C', "#C20078")));
        assert_eq!(tram_color("D"), Some(('D', "#DE9917")));
        assert_eq!(tram_color("e"), Some(('E', "#533786")));
    }

    #[test]
    fn tram_color_rejects_non_tram() {
        assert_eq!(tram_color("Z"), None);
        assert_eq!(tram_color("C1"), None);
        assert_eq!(tram_color(""), None);
        assert_eq!(tram_color("40"), None);
    }

    #[test]
    fn lowercase_tram_route_is_uppercased() {
        let mut leg = leg_at(45.18, 5.72);
        leg.mode = LegMode::Tram;
        leg.route_short_name = Some("b".into());

        let point = BoardingPoint::from_leg(&leg).unwrap();
        assert_eq!(point.route, "B");
        assert_eq!(point.color, "#479A45");
    }

    #[test]
    fn non_tram_route_gets_no_color() {
        let mut leg = leg_at(45.18, 5.72);
        leg.route_short_name = Some("Z".into());

        let point = BoardingPoint::from_leg(&leg).unwrap();
        assert_eq!(point.route, "Z");
        assert_eq!(point.color, "");
    }

    #[test]
    fn route_precedence_short_beats_route_beats_long() {
        let mut leg = leg_at(45.18, 5.72);
        leg.route_long_name = Some("Ligne C1 Grenoble - Meylan".into());
        leg.route = Some("C1-int".into());
        leg.route_short_name = Some("C1".into());
        let point = BoardingPoint::from_leg(&leg).unwrap();
        assert_eq!(point.route, "C1");

        let mut leg = leg_at(45.18, 5.72);
        leg.route_long_name = Some("Ligne C1 Grenoble - Meylan".into());
        leg.route = Some("C1-int".into());
        let point = BoardingPoint::from_leg(&leg).unwrap();
        assert_eq!(point.route, "C1-int");

        let mut leg = leg_at(45.18, 5.72);
        leg.route_long_name = Some("Ligne C1 Grenoble - Meylan".into());
        let point = BoardingPoint::from_leg(&leg).unwrap();
        assert_eq!(point.route, "Ligne C1 Grenoble - Meylan");
    }

    #[test]
    fn missing_coordinate_yields_no_point() {
        let leg = Leg::with_mode(LegMode::Bus);
        assert!(BoardingPoint::from_leg(&leg).is_none());
    }

    #[test]
    fn defaults_are_empty_strings() {
        let leg = leg_at(45.18, 5.72);
        let point = BoardingPoint::from_leg(&leg).unwrap();
        assert_eq!(point.agency_name, "");
        assert_eq!(point.headsign, "");
        assert_eq!(point.stop_name, "StopX");
        assert_eq!(point.mode, "BUS");
    }

    #[test]
    fn departure_lookup_only_for_bus_and_tram() {
        let mut leg = leg_at(45.18, 5.72);
        assert!(BoardingPoint::from_leg(&leg).unwrap().wants_departures());

        leg.mode = LegMode::Tram;
        assert!(BoardingPoint::from_leg(&leg).unwrap().wants_departures());

        leg.mode = LegMode::Walk;
        assert!(!BoardingPoint::from_leg(&leg).unwrap().wants_departures());

        leg.mode = LegMode::Rail;
        assert!(!BoardingPoint::from_leg(&leg).unwrap().wants_departures());
    }
}
