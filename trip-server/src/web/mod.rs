//! Web layer for the trip planning service.
//!
//! JSON endpoints for geocoding, trip planning, departure boards, and
//! environmental data.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LivePlanner};
