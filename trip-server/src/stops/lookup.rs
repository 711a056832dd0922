//! Stop code resolution.
//!
//! Boarding points carry the display name the trip planner returns,
//! which is rarely byte-identical to the registered stop name in the
//! route's stop list ("Victor Hugo" vs "Victor Hugo - Musée"). The
//! lookup treats a registered name that appears case-insensitively
//! inside the boarding name as a match.

use super::client::RouteStop;

/// Find the stop code for a boarding point name within a route's stops.
///
/// A registered stop matches when its name, lowercased, is a substring
/// of (or equal to) the lowercased boarding name. The first match in
/// route order wins.
pub fn find_stop_code<'a>(stops: &'a [RouteStop], boarding_name: &str) -> Option<&'a str> {
    let needle = boarding_name.to_lowercase();
    stops
        .iter()
        .find(|stop| needle.contains(&stop.name.to_lowercase()))
        .map(|stop| stop.gtfs_id.as_str())
}
