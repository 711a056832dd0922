//! Mock journey-planning client for testing without API access.
//!
//! Loads canned plan responses from JSON files and serves them as if
//! they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Plan;

use super::convert::convert_plan;
use super::error::OtpError;
use super::request::PlanRequest;
use super::types::PlanResponse;

/// Mock planning client that serves data from JSON files.
///
/// Expects files named `{MODE}.json` (e.g. `TRANSIT.json`, `WALK.json`)
/// containing full plan responses; the request's coordinates are
/// ignored, mock data is static.
#[derive(Clone)]
pub struct MockOtpClient {
    plans: Arc<RwLock<HashMap<String, Plan>>>,
}

impl MockOtpClient {
    /// Create a mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, OtpError> {
        let data_dir = data_dir.as_ref();
        let mut plans = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| OtpError::ApiError {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| OtpError::ApiError {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let mode = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| OtpError::ApiError {
                    status: 0,
                    message: format!("Invalid filename: {:?}", path),
                })?
                .to_string();

            let json = std::fs::read_to_string(&path).map_err(|e| OtpError::ApiError {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            let response: PlanResponse =
                serde_json::from_str(&json).map_err(|e| OtpError::ApiError {
                    status: 0,
                    message: format!("Failed to parse {:?}: {}", path, e),
                })?;

            plans.insert(mode, convert_plan(&response));
        }

        if plans.is_empty() {
            return Err(OtpError::ApiError {
                status: 0,
                message: format!("No mock plan files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            plans: Arc::new(RwLock::new(plans)),
        })
    }

    /// Build a mock client directly from in-memory responses, keyed by
    /// mode token.
    pub fn from_responses(responses: HashMap<String, PlanResponse>) -> Self {
        let plans = responses
            .into_iter()
            .map(|(mode, response)| (mode, convert_plan(&response)))
            .collect();
        Self {
            plans: Arc::new(RwLock::new(plans)),
        }
    }

    /// Build a mock client from already-converted plans.
    pub fn from_plans(plans: HashMap<String, Plan>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(plans)),
        }
    }

    /// Request a plan. Mimics `OtpClient::plan`.
    pub async fn plan(&self, request: &PlanRequest) -> Result<Plan, OtpError> {
        let plans = self.plans.read().await;

        let response = plans
            .get(request.mode.as_str())
            .ok_or_else(|| OtpError::ApiError {
                status: 404,
                message: format!(
                    "No mock data for mode {}. Available: {:?}",
                    request.mode,
                    plans.keys().collect::<Vec<_>>()
                ),
            })?;

        Ok(response.clone())
    }

    /// List mode tokens with mock data available.
    pub async fn available_modes(&self) -> Vec<String> {
        let plans = self.plans.read().await;
        plans.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiMode, Coordinate};

    fn transit_response() -> PlanResponse {
        serde_json::from_str(
            r#"{
            "plan": {
                "itineraries": [
                    {
                        "duration": 600.0,
                        "startTime": 0,
                        "endTime": 600000,
                        "legs": [{"mode": "BUS", "transitLeg": true}]
                    }
                ]
            }
        }"#,
        )
        .unwrap()
    }

    fn request(mode: ApiMode) -> PlanRequest {
        PlanRequest::new(
            Coordinate::new(45.18, 5.72).unwrap(),
            Coordinate::new(45.20, 5.78).unwrap(),
            mode,
        )
    }

    #[tokio::test]
    async fn serves_canned_plan_for_mode() {
        let mut responses = HashMap::new();
        responses.insert("TRANSIT".to_string(), transit_response());
        let mock = MockOtpClient::from_responses(responses);

        let plan = mock.plan(&request(ApiMode::Transit)).await.unwrap();
        assert_eq!(plan.itineraries.len(), 1);
    }

    #[tokio::test]
    async fn unknown_mode_is_an_error() {
        let mut responses = HashMap::new();
        responses.insert("TRANSIT".to_string(), transit_response());
        let mock = MockOtpClient::from_responses(responses);

        let result = mock.plan(&request(ApiMode::Car)).await;
        assert!(result.is_err());
    }
}
