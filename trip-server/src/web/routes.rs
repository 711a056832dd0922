//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDateTime;
use tracing::warn;

use crate::domain::TransportMode;
use crate::pipeline::{PlanError, TripQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/geocode", get(geocode))
        .route("/api/autocomplete", get(autocomplete))
        .route("/api/trip", post(plan_trip))
        .route("/api/trip/departures", post(departures))
        .route("/api/trip/compare", get(compare_modes))
        .route("/api/enviro/co2", get(co2_impact))
        .route("/api/enviro/weather", get(weather))
        .route("/api/enviro/air-quality", get(air_quality))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a free-text place name to a coordinate.
async fn geocode(
    State(state): State<AppState>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<GeocodeResponse>, AppError> {
    if req.q.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "query must not be empty".to_string(),
        });
    }

    let coord = state
        .geocoder
        .search(&req.q)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("no location found for {:?}", req.q),
        })?;

    Ok(Json(GeocodeResponse {
        lat: coord.lat(),
        lon: coord.lon(),
    }))
}

/// Address suggestions for a partial query.
async fn autocomplete(
    State(state): State<AppState>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let candidates = state
        .geocoder
        .autocomplete(&req.q)
        .await?
        .into_iter()
        .map(|c| AutocompleteCandidate {
            label: c.label,
            lat: c.coord.lat(),
            lon: c.coord.lon(),
        })
        .collect();

    Ok(Json(AutocompleteResponse { candidates }))
}

/// Plan a trip between two free-text places.
async fn plan_trip(
    State(state): State<AppState>,
    Json(req): Json<PlanTripRequest>,
) -> Result<Json<PlanTripResponse>, AppError> {
    let depart_at = req
        .depart_at
        .as_deref()
        .map(|s| {
            s.parse::<NaiveDateTime>().map_err(|_| AppError::BadRequest {
                message: format!("invalid departure timestamp: {:?}", s),
            })
        })
        .transpose()?;

    let query = TripQuery {
        origin: req.origin,
        destination: req.destination,
        mode: TransportMode::from_ui(&req.mode),
        wheelchair: req.wheelchair,
        walk_speed: req.walk_speed,
        bike_speed: req.bike_speed,
        safe_route: req.safe_route,
        depart_at,
    };

    let trip = state.planner.plan_trip(&query).await?;
    Ok(Json(trip.into()))
}

/// Departure boards for a planned trip's boarding points.
///
/// Returns 409 when the trip has been superseded by a newer search.
async fn departures(
    State(state): State<AppState>,
    Json(req): Json<DeparturesRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let boards = state
        .planner
        .departures_for(req.generation, &req.boarding_points)
        .await?;
    Ok(Json(DeparturesResponse { boards }))
}

/// Best itinerary per transport mode between two coordinates.
async fn compare_modes(
    State(state): State<AppState>,
    Query(req): Query<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let from = parse_coord(req.from_lat, req.from_lon)?;
    let to = parse_coord(req.to_lat, req.to_lon)?;

    let query = TripQuery::new("", "");
    let modes = state.planner.compare_modes(from, to, &query).await;
    Ok(Json(CompareResponse { modes }))
}

/// CO2 impact for a trip distance.
async fn co2_impact(
    State(state): State<AppState>,
    Query(req): Query<Co2Query>,
) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(state.enviro.co2_impact(req.distance).await?))
}

/// Current weather at a coordinate.
async fn weather(
    State(state): State<AppState>,
    Query(req): Query<CoordQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(state.enviro.weather(req.lat, req.lon).await?))
}

/// Current air quality at a coordinate.
async fn air_quality(
    State(state): State<AppState>,
    Query(req): Query<CoordQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(state.enviro.air_quality(req.lat, req.lon).await?))
}

fn parse_coord(lat: f64, lon: f64) -> Result<crate::domain::Coordinate, AppError> {
    crate::domain::Coordinate::new(lat, lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application-level errors with HTTP mappings.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The request referenced a superseded trip generation.
    Conflict { message: String },
    /// An upstream provider failed.
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::MissingInput { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::PlaceNotFound { .. } | PlanError::NoRoute => AppError::NotFound {
                message: e.to_string(),
            },
            PlanError::Stale { .. } => AppError::Conflict {
                message: e.to_string(),
            },
            PlanError::Geocode(_) | PlanError::Upstream(_) => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl From<crate::geocode::GeocodeError> for AppError {
    fn from(e: crate::geocode::GeocodeError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<crate::enviro::EnviroError> for AppError {
    fn from(e: crate::enviro::EnviroError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
