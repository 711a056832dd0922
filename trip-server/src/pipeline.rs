//! Trip planning pipeline: geocode, plan, select, extract, correlate.
//!
//! A planned trip carries a generation token. Departure correlation is
//! the slow tail of a request, so a correlation started for one trip
//! can outlive the next search; results for a superseded generation
//! are rejected instead of being served as if they were current.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{ApiMode, BoardingPoint, Coordinate, Itinerary, TransportMode};
use crate::geocode::GeocodeError;
use crate::otp::{OtpError, PlanProvider, PlanRequest};
use crate::route::{extract_boarding_points, extract_path, select_itinerary};
use crate::stops::{DepartureBoard, StopInfoProvider, correlate_boarding_points};

/// Free-text place resolution, implemented by the live geocoder and by
/// test doubles.
pub trait Geocoder: Sync {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send;
}

impl Geocoder for crate::geocode::GeocodeClient {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        crate::geocode::GeocodeClient::search(self, query).await
    }
}

impl<T: Geocoder + Send> Geocoder for std::sync::Arc<T> {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        self.as_ref().search(query).await
    }
}

#[derive(Debug)]
pub enum PlanError {
    /// Origin or destination was empty.
    MissingInput { field: &'static str },
    /// A place name resolved to nothing.
    PlaceNotFound { query: String },
    /// Geocoding itself failed.
    Geocode(GeocodeError),
    /// The journey planner failed.
    Upstream(OtpError),
    /// The backend returned no usable itinerary.
    NoRoute,
    /// The request's generation has been superseded.
    Stale { requested: u64, current: u64 },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::MissingInput { field } => write!(f, "missing required input: {}", field),
            PlanError::PlaceNotFound { query } => write!(f, "no location found for {:?}", query),
            PlanError::Geocode(e) => write!(f, "geocoding failed: {}", e),
            PlanError::Upstream(e) => write!(f, "journey planner request failed: {}", e),
            PlanError::NoRoute => write!(f, "could not compute a route"),
            PlanError::Stale { requested, current } => write!(
                f,
                "trip generation {} superseded by {}",
                requested, current
            ),
        }
    }
}

impl std::error::Error for PlanError {}

impl From<GeocodeError> for PlanError {
    fn from(e: GeocodeError) -> Self {
        PlanError::Geocode(e)
    }
}

impl From<OtpError> for PlanError {
    fn from(e: OtpError) -> Self {
        PlanError::Upstream(e)
    }
}

/// A trip planning query as the user phrased it.
#[derive(Debug, Clone)]
pub struct TripQuery {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    pub wheelchair: bool,
    pub walk_speed: Option<f64>,
    pub bike_speed: Option<f64>,
    pub safe_route: bool,
    pub depart_at: Option<NaiveDateTime>,
}

impl TripQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode: TransportMode::Walking,
            wheelchair: false,
            walk_speed: None,
            bike_speed: None,
            safe_route: false,
            depart_at: None,
        }
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A planned trip with its first-order derivations.
#[derive(Debug, Clone)]
pub struct PlannedTrip {
    /// Token tying later departure lookups to this trip.
    pub generation: u64,
    pub mode: ApiMode,
    pub itinerary: Itinerary,
    pub path: Vec<Coordinate>,
    pub boarding_points: Vec<BoardingPoint>,
}

/// Duration and distance of the best itinerary for one mode.
#[derive(Debug, Clone, Serialize)]
pub struct ModeSummary {
    pub mode: TransportMode,
    pub duration_secs: f64,
    pub distance_m: f64,
}

pub struct TripPlanner<G, P, S> {
    geocoder: G,
    plans: P,
    stops: S,
    generation: AtomicU64,
}

impl<G, P, S> TripPlanner<G, P, S>
where
    G: Geocoder,
    P: PlanProvider,
    S: StopInfoProvider,
{
    pub fn new(geocoder: G, plans: P, stops: S) -> Self {
        Self {
            geocoder,
            plans,
            stops,
            generation: AtomicU64::new(0),
        }
    }

    /// Plan a trip from free-text origin and destination.
    ///
    /// Starting a plan supersedes all earlier generations: any
    /// departure lookup still in flight for a previous trip will be
    /// rejected as stale.
    pub async fn plan_trip(&self, query: &TripQuery) -> Result<PlannedTrip, PlanError> {
        if query.origin.trim().is_empty() {
            return Err(PlanError::MissingInput { field: "origin" });
        }
        if query.destination.trim().is_empty() {
            return Err(PlanError::MissingInput { field: "destination" });
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let from = self.resolve(&query.origin).await?;
        let to = self.resolve(&query.destination).await?;

        self.plan_between(generation, from, to, query).await
    }

    /// Plan a trip between already-resolved coordinates.
    pub async fn plan_trip_at(
        &self,
        from: Coordinate,
        to: Coordinate,
        query: &TripQuery,
    ) -> Result<PlannedTrip, PlanError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.plan_between(generation, from, to, query).await
    }

    async fn plan_between(
        &self,
        generation: u64,
        from: Coordinate,
        to: Coordinate,
        query: &TripQuery,
    ) -> Result<PlannedTrip, PlanError> {
        let mode = query.mode.api_mode();
        let request = PlanRequest {
            from,
            to,
            mode,
            wheelchair: query.wheelchair,
            walk_speed: query.walk_speed,
            bike_speed: query.bike_speed,
            safe_route: query.safe_route,
            depart_at: query.depart_at,
        };

        let plan = self.plans.plan(&request).await?;
        let itinerary = select_itinerary(&plan.itineraries, mode)
            .cloned()
            .ok_or(PlanError::NoRoute)?;

        let path = extract_path(&plan, mode);
        let boarding_points = extract_boarding_points(&plan, mode);

        info!(
            generation,
            mode = mode.as_str(),
            legs = itinerary.legs.len(),
            points = boarding_points.len(),
            "planned trip"
        );

        Ok(PlannedTrip {
            generation,
            mode,
            itinerary,
            path,
            boarding_points,
        })
    }

    /// Departure boards for a planned trip's boarding points.
    ///
    /// Rejects the request when its generation is no longer current,
    /// both before the fan-out and again after it completes, so a
    /// search issued mid-correlation wins over the in-flight batch.
    pub async fn departures_for(
        &self,
        generation: u64,
        points: &[BoardingPoint],
    ) -> Result<Vec<Option<DepartureBoard>>, PlanError> {
        self.check_generation(generation)?;
        let boards = correlate_boarding_points(&self.stops, points).await;
        self.check_generation(generation)?;
        Ok(boards)
    }

    /// Best itinerary per transport mode between two points.
    ///
    /// Modes are queried one at a time to bound backend load. A mode
    /// whose request fails or returns nothing is left out.
    pub async fn compare_modes(
        &self,
        from: Coordinate,
        to: Coordinate,
        query: &TripQuery,
    ) -> Vec<ModeSummary> {
        let mut summaries = Vec::new();
        for mode in TransportMode::all() {
            let request = PlanRequest {
                from,
                to,
                mode: mode.api_mode(),
                wheelchair: query.wheelchair,
                walk_speed: query.walk_speed,
                bike_speed: query.bike_speed,
                safe_route: query.safe_route,
                depart_at: query.depart_at,
            };

            let plan = match self.plans.plan(&request).await {
                Ok(plan) => plan,
                Err(e) => {
                    warn!(mode = mode.api_mode().as_str(), %e, "mode comparison fetch failed");
                    continue;
                }
            };

            let Some(itinerary) = select_itinerary(&plan.itineraries, mode.api_mode()) else {
                continue;
            };
            summaries.push(ModeSummary {
                mode,
                duration_secs: itinerary.duration,
                distance_m: itinerary.walk_distance,
            });
        }
        summaries
    }

    /// The most recent generation issued.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn check_generation(&self, requested: u64) -> Result<(), PlanError> {
        let current = self.current_generation();
        if requested != current {
            return Err(PlanError::Stale { requested, current });
        }
        Ok(())
    }

    async fn resolve(&self, query: &str) -> Result<Coordinate, PlanError> {
        match self.geocoder.search(query).await? {
            Some(coord) => Ok(coord),
            None => Err(PlanError::PlaceNotFound {
                query: query.to_string(),
            }),
        }
    }
}
