//! Environmental data pass-throughs: CO2 impact, weather, air quality.
//!
//! These providers return JSON the app forwards untouched, so the
//! responses stay as `serde_json::Value` rather than typed models.

use std::fmt;

use serde_json::Value;

pub const DEFAULT_CO2_BASE_URL: &str = "https://data.mobilites-m.fr/api";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_AIR_QUALITY_BASE_URL: &str =
    "https://air-quality-api.open-meteo.com/v1";

#[derive(Debug)]
pub enum EnviroError {
    Http(reqwest::Error),
    Json { message: String },
    ApiError { status: u16 },
}

impl fmt::Display for EnviroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnviroError::Http(e) => write!(f, "environmental data HTTP error: {}", e),
            EnviroError::Json { message } => {
                write!(f, "failed to parse environmental data: {}", message)
            }
            EnviroError::ApiError { status } => {
                write!(f, "environmental data provider returned status {}", status)
            }
        }
    }
}

impl std::error::Error for EnviroError {}

impl From<reqwest::Error> for EnviroError {
    fn from(e: reqwest::Error) -> Self {
        EnviroError::Http(e)
    }
}

#[derive(Debug, Clone)]
pub struct EnviroConfig {
    pub co2_base_url: String,
    pub weather_base_url: String,
    pub air_quality_base_url: String,
}

impl EnviroConfig {
    pub fn new() -> Self {
        Self {
            co2_base_url: DEFAULT_CO2_BASE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            air_quality_base_url: DEFAULT_AIR_QUALITY_BASE_URL.to_string(),
        }
    }

    pub fn with_co2_base_url(mut self, url: impl Into<String>) -> Self {
        self.co2_base_url = url.into();
        self
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.weather_base_url = url.into();
        self
    }

    pub fn with_air_quality_base_url(mut self, url: impl Into<String>) -> Self {
        self.air_quality_base_url = url.into();
        self
    }
}

impl Default for EnviroConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EnviroClient {
    http: reqwest::Client,
    config: EnviroConfig,
}

impl EnviroClient {
    pub fn new(http: reqwest::Client, config: EnviroConfig) -> Self {
        Self { http, config }
    }

    /// CO2 impact for a trip of the given distance in meters.
    pub async fn co2_impact(&self, distance_m: f64) -> Result<Value, EnviroError> {
        let url = format!("{}/carbone", self.config.co2_base_url);
        self.get_json(&url, &[("distance", distance_m.to_string())])
            .await
    }

    /// Current weather at a coordinate.
    pub async fn weather(&self, lat: f64, lon: f64) -> Result<Value, EnviroError> {
        let url = format!("{}/forecast", self.config.weather_base_url);
        self.get_json(
            &url,
            &[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
            ],
        )
        .await
    }

    /// Current air quality at a coordinate.
    pub async fn air_quality(&self, lat: f64, lon: f64) -> Result<Value, EnviroError> {
        let url = format!("{}/air-quality", self.config.air_quality_base_url);
        self.get_json(
            &url,
            &[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", "european_aqi".to_string()),
            ],
        )
        .await
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, EnviroError> {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnviroError::ApiError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| EnviroError::Json {
            message: e.to_string(),
        })
    }
}
