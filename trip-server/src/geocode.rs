//! Geocoding and address autocomplete.
//!
//! Free-text place names resolve through Nominatim with a fixed
//! locality suffix appended, since the app only plans trips within one
//! urban area. Autocomplete goes through the BAN address API, which
//! returns GeoJSON features with ready-made display labels.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::domain::Coordinate;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_AUTOCOMPLETE_BASE_URL: &str = "https://api-adresse.data.gouv.fr";
pub const DEFAULT_LOCALITY_SUFFIX: &str = ", Grenoble, France";

/// Queries shorter than this return no candidates without a network
/// call.
const MIN_AUTOCOMPLETE_LEN: usize = 3;

#[derive(Debug)]
pub enum GeocodeError {
    /// The HTTP request failed.
    Http(reqwest::Error),
    /// The response body was not the JSON we expected.
    Json { message: String },
    /// The provider returned a non-success status.
    ApiError { status: u16 },
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Http(e) => write!(f, "geocode HTTP error: {}", e),
            GeocodeError::Json { message } => {
                write!(f, "failed to parse geocode response: {}", message)
            }
            GeocodeError::ApiError { status } => {
                write!(f, "geocode provider returned status {}", status)
            }
        }
    }
}

impl std::error::Error for GeocodeError {}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        GeocodeError::Http(e)
    }
}

/// An autocomplete suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct AddressCandidate {
    pub label: String,
    pub coord: Coordinate,
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct BanResponse {
    #[serde(default)]
    features: Vec<BanFeature>,
}

#[derive(Debug, Deserialize)]
struct BanFeature {
    properties: BanProperties,
    geometry: BanGeometry,
}

#[derive(Debug, Deserialize)]
struct BanProperties {
    label: String,
}

#[derive(Debug, Deserialize)]
struct BanGeometry {
    /// GeoJSON order: [longitude, latitude].
    coordinates: [f64; 2],
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    pub search_base_url: String,
    pub autocomplete_base_url: String,
    /// Appended to every free-text search query.
    pub locality_suffix: String,
}

impl GeocodeConfig {
    pub fn new() -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            autocomplete_base_url: DEFAULT_AUTOCOMPLETE_BASE_URL.to_string(),
            locality_suffix: DEFAULT_LOCALITY_SUFFIX.to_string(),
        }
    }

    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    pub fn with_autocomplete_base_url(mut self, url: impl Into<String>) -> Self {
        self.autocomplete_base_url = url.into();
        self
    }

    pub fn with_locality_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.locality_suffix = suffix.into();
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GeocodeClient {
    http: reqwest::Client,
    config: GeocodeConfig,
}

impl GeocodeClient {
    pub fn new(http: reqwest::Client, config: GeocodeConfig) -> Self {
        Self { http, config }
    }

    /// Resolve a free-text place name to a coordinate.
    ///
    /// The locality suffix is appended before querying. Returns
    /// `Ok(None)` when the provider has no match.
    pub async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let full_query = format!("{}{}", query, self.config.locality_suffix);
        let url = format!("{}/search", self.config.search_base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", full_query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::ApiError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let results: Vec<NominatimResult> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let Some(first) = results.first() else {
            debug!(%query, "geocode returned no results");
            return Ok(None);
        };

        let lat: f64 = first.lat.parse().map_err(|_| GeocodeError::Json {
            message: format!("non-numeric latitude: {}", first.lat),
        })?;
        let lon: f64 = first.lon.parse().map_err(|_| GeocodeError::Json {
            message: format!("non-numeric longitude: {}", first.lon),
        })?;

        let coord = Coordinate::new(lat, lon).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;
        Ok(Some(coord))
    }

    /// Address suggestions for a partial query.
    ///
    /// Queries under three characters return an empty list without
    /// hitting the provider.
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<AddressCandidate>, GeocodeError> {
        if query.chars().count() < MIN_AUTOCOMPLETE_LEN {
            return Ok(Vec::new());
        }

        let url = format!("{}/search/", self.config.autocomplete_base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("limit", "5")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::ApiError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: BanResponse = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        let candidates = parsed
            .features
            .into_iter()
            .filter_map(|feature| {
                let [lon, lat] = feature.geometry.coordinates;
                let coord = Coordinate::new(lat, lon).ok()?;
                Some(AddressCandidate {
                    label: feature.properties.label,
                    coord,
                })
            })
            .collect();
        Ok(candidates)
    }
}
