//! Transport mode types.
//!
//! Three layers of "mode" exist and must not be conflated:
//!
//! - [`TransportMode`]: the four choices the user can make in the client.
//! - [`ApiMode`]: the token sent to the journey-planning backend.
//! - [`LegMode`]: the per-leg mode the backend reports in its response,
//!   which is a much wider set (tram, rail, cable car, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-facing transport choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Bicycle,
    Bus,
    Car,
}

impl TransportMode {
    /// Parse a UI mode string. Total: anything unrecognized falls back
    /// to walking rather than failing, so a stale or garbled client
    /// value can never break a search.
    pub fn from_ui(s: &str) -> Self {
        match s {
            "walking" => TransportMode::Walking,
            "bicycle" => TransportMode::Bicycle,
            "bus" => TransportMode::Bus,
            "car" => TransportMode::Car,
            _ => TransportMode::Walking,
        }
    }

    /// The backend query token for this mode.
    pub fn api_mode(&self) -> ApiMode {
        match self {
            TransportMode::Walking => ApiMode::Walk,
            TransportMode::Bicycle => ApiMode::Bicycle,
            TransportMode::Bus => ApiMode::Transit,
            TransportMode::Car => ApiMode::Car,
        }
    }

    /// All four modes, in the order the comparison feature queries them.
    pub fn all() -> [TransportMode; 4] {
        [
            TransportMode::Walking,
            TransportMode::Bicycle,
            TransportMode::Bus,
            TransportMode::Car,
        ]
    }
}

/// A backend mode token for the itinerary request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Walk,
    Bicycle,
    Transit,
    Car,
}

impl ApiMode {
    /// The literal token the backend expects in its `mode` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMode::Walk => "WALK",
            ApiMode::Bicycle => "BICYCLE",
            ApiMode::Transit => "TRANSIT",
            ApiMode::Car => "CAR",
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mode of a single itinerary leg as reported by the backend.
///
/// The `Other` variant keeps unrecognized tokens instead of silently
/// collapsing them, so downstream code can still display them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegMode {
    Walk,
    Bicycle,
    Car,
    Bus,
    Tram,
    Rail,
    Subway,
    CableCar,
    Other(String),
}

impl LegMode {
    /// Parse a backend leg-mode token.
    pub fn parse(s: &str) -> Self {
        match s {
            "WALK" => LegMode::Walk,
            "BICYCLE" => LegMode::Bicycle,
            "CAR" => LegMode::Car,
            "BUS" => LegMode::Bus,
            "TRAM" => LegMode::Tram,
            "RAIL" => LegMode::Rail,
            "SUBWAY" => LegMode::Subway,
            "CABLE_CAR" => LegMode::CableCar,
            other => LegMode::Other(other.to_string()),
        }
    }

    /// The backend token for this mode.
    pub fn as_str(&self) -> &str {
        match self {
            LegMode::Walk => "WALK",
            LegMode::Bicycle => "BICYCLE",
            LegMode::Car => "CAR",
            LegMode::Bus => "BUS",
            LegMode::Tram => "TRAM",
            LegMode::Rail => "RAIL",
            LegMode::Subway => "SUBWAY",
            LegMode::CableCar => "CABLE_CAR",
            LegMode::Other(s) => s,
        }
    }

    /// True for the modes that count as public transit when deciding
    /// whether an itinerary really uses transit.
    pub fn is_transit(&self) -> bool {
        matches!(
            self,
            LegMode::Bus | LegMode::Tram | LegMode::Rail | LegMode::Subway
        )
    }
}

impl fmt::Display for LegMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
