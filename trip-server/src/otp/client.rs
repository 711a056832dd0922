//! Journey-planning backend HTTP client.
//!
//! Provides async methods for requesting itineraries from an OTP-style
//! routing API. Handles concurrency limiting and conversion to domain
//! types.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Plan;

use super::convert::convert_plan;
use super::error::OtpError;
use super::request::PlanRequest;
use super::types::PlanResponse;

/// Default base URL for the journey-planning API.
const DEFAULT_BASE_URL: &str = "https://data.mobilites-m.fr/api/routers/default";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the journey-planning client.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Base URL for the API (defaults to the production router)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OtpConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Journey-planning API client.
///
/// Uses a semaphore to limit concurrent requests and avoid hammering
/// the public router.
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OtpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OtpConfig) -> Result<Self, OtpError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Request an itinerary plan.
    ///
    /// Returns the converted domain plan. A backend "no trip found"
    /// response converts to an empty plan, not an error; callers decide
    /// what an empty itinerary list means for them.
    pub async fn plan(&self, request: &PlanRequest) -> Result<Plan, OtpError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OtpError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/plan", self.base_url);
        debug!(mode = %request.mode, "requesting itinerary plan");

        let response = self
            .http
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OtpError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OtpError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: PlanResponse = serde_json::from_str(&body).map_err(|e| OtpError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        Ok(convert_plan(&parsed))
    }
}
