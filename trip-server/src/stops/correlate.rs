//! Matching boarding points to real-time departure groups.
//!
//! The departure feed keys everything by opaque pattern identifiers
//! like `SEM:3903:0:010` or `SEM:C1:1:020`, while a boarding point
//! only knows its display route ("12", "C1", "A"). The match policy
//! is explicit and two-tier: route-pattern match first, first
//! available group as a fallback, and the tier is reported so callers
//! can tell a confident match from a best guess.

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{BoardingPoint, LegMode};

use super::client::{PatternStoptimes, RouteStop, StopTime};
use super::error::StopsError;
use super::lookup::find_stop_code;

/// Read-side interface over stop data, implemented by the live
/// service and by in-memory test doubles.
pub trait StopInfoProvider: Sync {
    /// Stop list for a route, as `SEM:{route}` identifiers.
    fn route_stops(
        &self,
        route: &str,
    ) -> impl Future<Output = Result<Vec<RouteStop>, StopsError>> + Send;

    /// Real-time departure groups for a stop code.
    fn stoptimes(
        &self,
        stop_code: &str,
    ) -> impl Future<Output = Result<Vec<PatternStoptimes>, StopsError>> + Send;
}

/// How a departure group was matched to a boarding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// The pattern identifier matched the boarding point's route.
    Pattern,
    /// No pattern matched; the first group at the stop was used.
    FirstAvailable,
}

/// One upcoming departure, resolved to an absolute timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Departure {
    /// Departure time, epoch seconds.
    pub time: i64,
    /// Whether the time is live or scheduled.
    pub realtime: bool,
}

impl Departure {
    fn from_stop_time(st: &StopTime) -> Self {
        Self {
            time: st.service_day + i64::from(st.realtime_departure),
            realtime: st.realtime,
        }
    }
}

/// Departures matched for one boarding point.
#[derive(Debug, Clone, Serialize)]
pub struct DepartureBoard {
    /// Stop code the departures were fetched for.
    pub stop_code: String,
    /// Route of the boarding point the board belongs to.
    pub route: String,
    /// Destination description from the matched pattern.
    pub headsign: String,
    pub tier: MatchTier,
    pub departures: Vec<Departure>,
}

/// Extract the numeric route number from a bus pattern identifier.
///
/// Bus pattern ids embed the route as `SEM:<digits>:`, e.g.
/// `SEM:3903:0:010` carries route number `3903`. Returns `None` for
/// identifiers in any other shape, including tram-style ids whose
/// middle segment is not purely numeric.
pub fn bus_route_number(pattern_id: &str) -> Option<&str> {
    let rest = pattern_id.strip_prefix("SEM:")?;
    let (number, _) = rest.split_once(':')?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(number)
}

/// Pick the departure group for a boarding point from a stop's feed.
///
/// Bus routes match on the exact pattern route number; tram and other
/// modes match when the pattern id contains `:<route>:`. When neither
/// rule selects a group, the first group is returned at the
/// `FirstAvailable` tier, since the feed is not always
/// route-disambiguated at shared stops.
fn match_pattern<'a>(
    groups: &'a [PatternStoptimes],
    mode: LegMode,
    route: &str,
) -> Option<(&'a PatternStoptimes, MatchTier)> {
    let matched = groups.iter().find(|group| match mode {
        LegMode::Bus => bus_route_number(&group.pattern.id) == Some(route),
        _ => group.pattern.id.contains(&format!(":{}:", route)),
    });

    if let Some(group) = matched {
        return Some((group, MatchTier::Pattern));
    }
    groups.first().map(|group| (group, MatchTier::FirstAvailable))
}

/// Resolve the departure board for one boarding point.
///
/// Every failure path degrades to `None` for this point alone:
/// missing stop code, upstream errors, and empty feeds are logged and
/// swallowed so sibling lookups are unaffected.
pub async fn departures_for_point<P: StopInfoProvider>(
    provider: &P,
    point: &BoardingPoint,
) -> Option<DepartureBoard> {
    if !point.wants_departures() {
        return None;
    }
    let mode = LegMode::parse(&point.mode);

    let stops = match provider.route_stops(&point.route).await {
        Ok(stops) => stops,
        Err(e) => {
            warn!(route = %point.route, %e, "failed to fetch route stops");
            return None;
        }
    };

    let Some(stop_code) = find_stop_code(&stops, &point.stop_name) else {
        debug!(
            route = %point.route,
            stop = %point.stop_name,
            "no stop code resolved"
        );
        return None;
    };
    let stop_code = stop_code.to_string();

    let groups = match provider.stoptimes(&stop_code).await {
        Ok(groups) => groups,
        Err(e) => {
            warn!(%stop_code, %e, "failed to fetch stoptimes");
            return None;
        }
    };

    let (group, tier) = match_pattern(&groups, mode, &point.route)?;
    Some(DepartureBoard {
        stop_code,
        route: point.route.clone(),
        headsign: group.pattern.desc.clone(),
        tier,
        departures: group.times.iter().map(Departure::from_stop_time).collect(),
    })
}

/// Resolve departure boards for a batch of boarding points.
///
/// Lookups run concurrently and independently; the result vector is
/// index-aligned with the input, with `None` for points that are not
/// bus or tram or whose lookup failed.
pub async fn correlate_boarding_points<P: StopInfoProvider>(
    provider: &P,
    points: &[BoardingPoint],
) -> Vec<Option<DepartureBoard>> {
    join_all(points.iter().map(|p| departures_for_point(provider, p))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::stops::client::Pattern;
    use std::collections::HashMap;

    #[test]
    fn bus_route_number_parses_numeric_segment() {
        assert_eq!(bus_route_number("SEM:3903:0:010"), Some("3903"));
        assert_eq!(bus_route_number("SEM:12:1:020"), Some("12"));
    }

    #[test]
    fn bus_route_number_rejects_other_shapes() {
        assert_eq!(bus_route_number("SEM:C1:0:010"), None);
        assert_eq!(bus_route_number("TAG:12:0:010"), None);
        assert_eq!(bus_route_number("SEM::0:010"), None);
        assert_eq!(bus_route_number("SEM:12"), None);
        assert_eq!(bus_route_number(""), None);
    }

    fn group(pattern_id: &str, desc: &str, departures: &[(i64, u32, bool)]) -> PatternStoptimes {
        PatternStoptimes {
            pattern: Pattern {
                id: pattern_id.into(),
                desc: desc.into(),
            },
            times: departures
                .iter()
                .map(|&(service_day, realtime_departure, realtime)| StopTime {
                    service_day,
                    realtime_departure,
                    realtime,
                })
                .collect(),
        }
    }

    #[test]
    fn bus_matches_on_exact_route_number() {
        let groups = vec![
            group("SEM:11:0:010", "Sassenage", &[]),
            group("SEM:12:0:010", "Saint-Egrève", &[]),
        ];
        let (matched, tier) = match_pattern(&groups, LegMode::Bus, "12").unwrap();
        assert_eq!(matched.pattern.id, "SEM:12:0:010");
        assert_eq!(tier, MatchTier::Pattern);
    }

    #[test]
    fn tram_matches_on_route_substring() {
        let groups = vec![
            group("SEM:B:1:020", "Oxford", &[]),
            group("SEM:A:0:010", "Échirolles", &[]),
        ];
        let (matched, tier) = match_pattern(&groups, LegMode::Tram, "A").unwrap();
        assert_eq!(matched.pattern.id, "SEM:A:0:010");
        assert_eq!(tier, MatchTier::Pattern);
    }

    #[test]
    fn unmatched_route_falls_back_to_first_group() {
        let groups = vec![
            group("SEM:11:0:010", "Sassenage", &[]),
            group("SEM:12:0:010", "Saint-Egrève", &[]),
        ];
        let (matched, tier) = match_pattern(&groups, LegMode::Bus, "99").unwrap();
        assert_eq!(matched.pattern.id, "SEM:11:0:010");
        assert_eq!(tier, MatchTier::FirstAvailable);
    }

    #[test]
    fn empty_feed_matches_nothing() {
        assert!(match_pattern(&[], LegMode::Bus, "12").is_none());
    }

    #[test]
    fn departure_time_is_service_day_plus_offset() {
        let d = Departure::from_stop_time(&StopTime {
            service_day: 1_700_000_000,
            realtime_departure: 3_600,
            realtime: true,
        });
        assert_eq!(d.time, 1_700_003_600);
        assert!(d.realtime);
    }

    /// Provider backed by in-memory maps; routes and stops absent from
    /// the maps report an upstream error.
    struct FakeProvider {
        stops_by_route: HashMap<String, Vec<RouteStop>>,
        times_by_stop: HashMap<String, Vec<PatternStoptimes>>,
    }

    impl StopInfoProvider for FakeProvider {
        async fn route_stops(&self, route: &str) -> Result<Vec<RouteStop>, StopsError> {
            self.stops_by_route.get(route).cloned().ok_or(StopsError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        }

        async fn stoptimes(&self, stop_code: &str) -> Result<Vec<PatternStoptimes>, StopsError> {
            self.times_by_stop.get(stop_code).cloned().ok_or(StopsError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        }
    }

    fn point(mode: &str, route: &str, stop_name: &str) -> BoardingPoint {
        BoardingPoint {
            coord: Coordinate::new(45.18, 5.72).unwrap(),
            mode: mode.to_string(),
            route: route.to_string(),
            agency_name: String::new(),
            stop_name: stop_name.to_string(),
            color: String::new(),
            headsign: String::new(),
        }
    }

    fn provider_with_route(route: &str, stop_code: &str) -> FakeProvider {
        let mut stops_by_route = HashMap::new();
        stops_by_route.insert(
            route.to_string(),
            vec![RouteStop {
                name: "Victor Hugo".into(),
                gtfs_id: stop_code.into(),
            }],
        );
        let mut times_by_stop = HashMap::new();
        times_by_stop.insert(
            stop_code.to_string(),
            vec![group("SEM:12:0:010", "Saint-Egrève", &[(1_700_000_000, 60, false)])],
        );
        FakeProvider {
            stops_by_route,
            times_by_stop,
        }
    }

    #[tokio::test]
    async fn resolves_board_for_bus_point() {
        let provider = provider_with_route("12", "SEM:GENVH1");
        let board = departures_for_point(&provider, &point("BUS", "12", "Victor Hugo"))
            .await
            .unwrap();

        assert_eq!(board.stop_code, "SEM:GENVH1");
        assert_eq!(board.tier, MatchTier::Pattern);
        assert_eq!(board.headsign, "Saint-Egrève");
        assert_eq!(board.departures.len(), 1);
        assert_eq!(board.departures[0].time, 1_700_000_060);
    }

    #[tokio::test]
    async fn walk_point_is_skipped_without_lookup() {
        let provider = FakeProvider {
            stops_by_route: HashMap::new(),
            times_by_stop: HashMap::new(),
        };
        assert!(
            departures_for_point(&provider, &point("WALK", "", "Somewhere"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn failing_point_does_not_affect_siblings() {
        let provider = provider_with_route("12", "SEM:GENVH1");

        // Five points; #2 targets a route the provider errors on.
        let points = vec![
            point("BUS", "12", "Victor Hugo"),
            point("BUS", "99", "Nowhere"),
            point("BUS", "12", "Victor Hugo"),
            point("BUS", "12", "Victor Hugo"),
            point("BUS", "12", "Victor Hugo"),
        ];

        let boards = correlate_boarding_points(&provider, &points).await;
        assert_eq!(boards.len(), 5);
        assert!(boards[0].is_some());
        assert!(boards[1].is_none());
        assert!(boards[2].is_some());
        assert!(boards[3].is_some());
        assert!(boards[4].is_some());
    }

    #[tokio::test]
    async fn unresolvable_stop_name_yields_none() {
        let provider = provider_with_route("12", "SEM:GENVH1");
        assert!(
            departures_for_point(&provider, &point("BUS", "12", "Unknown Stop"))
                .await
                .is_none()
        );
    }
}
