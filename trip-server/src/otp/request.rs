//! Itinerary request parameters.
//!
//! Maps the user's transport choice and auxiliary toggles onto the
//! backend's query string.

use chrono::NaiveDateTime;

use crate::domain::{ApiMode, Coordinate};

/// The backend expects walk/bike speeds in its own unit; UI speeds are
/// m/s and must be divided by this before sending. The exact value is
/// load-bearing for backend compatibility - do not "fix" it.
pub const SPEED_DIVISOR: f64 = 2.25;

/// Parameters for one itinerary request.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub from: Coordinate,
    pub to: Coordinate,
    pub mode: ApiMode,

    /// Prefer wheelchair-accessible itineraries.
    pub wheelchair: bool,

    /// Walking speed in m/s. `None` or zero omits the parameter.
    pub walk_speed: Option<f64>,

    /// Cycling speed in m/s. `None` or zero omits the parameter.
    pub bike_speed: Option<f64>,

    /// Prefer safer (rather than faster) routes.
    pub safe_route: bool,

    /// Requested departure, split into separate date and time fields.
    pub depart_at: Option<NaiveDateTime>,
}

impl PlanRequest {
    /// A plain request with no auxiliary options.
    pub fn new(from: Coordinate, to: Coordinate, mode: ApiMode) -> Self {
        PlanRequest {
            from,
            to,
            mode,
            wheelchair: false,
            walk_speed: None,
            bike_speed: None,
            safe_route: false,
            depart_at: None,
        }
    }

    /// Build the query pairs for the backend `plan` endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("fromPlace", self.from.as_place_param()),
            ("toPlace", self.to.as_place_param()),
            ("mode", self.mode.as_str().to_string()),
        ];

        if self.wheelchair {
            pairs.push(("wheelchair", "true".to_string()));
        }

        if let Some(v) = convert_speed(self.walk_speed) {
            pairs.push(("walkSpeed", v));
        }
        if let Some(v) = convert_speed(self.bike_speed) {
            pairs.push(("bikeSpeed", v));
        }

        if self.safe_route {
            pairs.push(("optimize", "SAFE".to_string()));
        }

        if let Some(dt) = self.depart_at {
            pairs.push(("date", dt.format("%Y-%m-%d").to_string()));
            pairs.push(("time", dt.format("%H:%M").to_string()));
        }

        pairs
    }
}

/// Convert a UI speed (m/s) into the backend unit.
///
/// Absent or zero speeds yield `None`: the parameter is omitted rather
/// than sent as zero, which the backend would treat as "cannot move."
fn convert_speed(speed: Option<f64>) -> Option<String> {
    let s = speed?;
    if s <= 0.0 {
        return None;
    }
    Some(format!("{}", s / SPEED_DIVISOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn grenoble() -> Coordinate {
        Coordinate::new(45.1885, 5.7245).unwrap()
    }

    fn meylan() -> Coordinate {
        Coordinate::new(45.2097, 5.7784).unwrap()
    }

    fn pair<'a>(pairs: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn basic_request_has_three_parameters() {
        let req = PlanRequest::new(grenoble(), meylan(), ApiMode::Transit);
        let pairs = req.query_pairs();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pair(&pairs, "fromPlace"), Some("45.1885,5.7245"));
        assert_eq!(pair(&pairs, "toPlace"), Some("45.2097,5.7784"));
        assert_eq!(pair(&pairs, "mode"), Some("TRANSIT"));
    }

    #[test]
    fn walk_speed_is_divided_by_2_25() {
        let mut req = PlanRequest::new(grenoble(), meylan(), ApiMode::Walk);
        req.walk_speed = Some(4.5);

        let pairs = req.query_pairs();
        assert_eq!(pair(&pairs, "walkSpeed"), Some("2"));
    }

    #[test]
    fn bike_speed_uses_same_divisor() {
        let mut req = PlanRequest::new(grenoble(), meylan(), ApiMode::Bicycle);
        req.bike_speed = Some(9.0);

        let pairs = req.query_pairs();
        assert_eq!(pair(&pairs, "bikeSpeed"), Some("4"));
    }

    #[test]
    fn zero_or_absent_speed_is_omitted() {
        let mut req = PlanRequest::new(grenoble(), meylan(), ApiMode::Walk);
        req.walk_speed = Some(0.0);
        req.bike_speed = None;

        let pairs = req.query_pairs();
        assert_eq!(pair(&pairs, "walkSpeed"), None);
        assert_eq!(pair(&pairs, "bikeSpeed"), None);
    }

    #[test]
    fn wheelchair_flag() {
        let mut req = PlanRequest::new(grenoble(), meylan(), ApiMode::Transit);
        req.wheelchair = true;
        assert_eq!(pair(&req.query_pairs(), "wheelchair"), Some("true"));
    }

    #[test]
    fn safe_route_adds_optimize() {
        let mut req = PlanRequest::new(grenoble(), meylan(), ApiMode::Bicycle);
        req.safe_route = true;
        assert_eq!(pair(&req.query_pairs(), "optimize"), Some("SAFE"));
    }

    #[test]
    fn departure_splits_into_date_and_time() {
        let mut req = PlanRequest::new(grenoble(), meylan(), ApiMode::Transit);
        req.depart_at = Some(
            NaiveDate::from_ymd_opt(2025, 4, 9)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        );

        let pairs = req.query_pairs();
        assert_eq!(pair(&pairs, "date"), Some("2025-04-09"));
        assert_eq!(pair(&pairs, "time"), Some("14:05"));
    }

    #[test]
    fn no_departure_no_date_fields() {
        let req = PlanRequest::new(grenoble(), meylan(), ApiMode::Walk);
        let pairs = req.query_pairs();
        assert_eq!(pair(&pairs, "date"), None);
        assert_eq!(pair(&pairs, "time"), None);
    }
}
