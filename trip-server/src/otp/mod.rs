//! Journey-planning backend client.
//!
//! The backend is an OTP-style routing API consumed as a black box:
//! DTOs in `types`, query building in `request`, conversion to domain
//! types in `convert`, the HTTP client in `client`, and a file-backed
//! mock in `mock` for development and tests.

mod client;
mod convert;
mod error;
mod mock;
mod request;
pub mod types;

pub use client::{OtpClient, OtpConfig};
pub use convert::convert_plan;
pub use error::OtpError;
pub use mock::MockOtpClient;
pub use request::{PlanRequest, SPEED_DIVISOR};

use crate::domain::Plan;

/// Source of itinerary plans.
///
/// Implemented by the real HTTP client and by the mock, so the pipeline
/// can be exercised without network access.
pub trait PlanProvider {
    fn plan(
        &self,
        request: &PlanRequest,
    ) -> impl std::future::Future<Output = Result<Plan, OtpError>> + Send;
}

impl PlanProvider for OtpClient {
    async fn plan(&self, request: &PlanRequest) -> Result<Plan, OtpError> {
        OtpClient::plan(self, request).await
    }
}

impl PlanProvider for MockOtpClient {
    async fn plan(&self, request: &PlanRequest) -> Result<Plan, OtpError> {
        MockOtpClient::plan(self, request).await
    }
}
