//! Domain types for the trip planner.
//!
//! These are the validated value types the pipeline operates on. They
//! are built once from a backend response (see `otp::convert`) and are
//! immutable from then on.

mod boarding;
mod coord;
mod itinerary;
mod leg;
mod mode;

pub use boarding::{BoardingPoint, tram_color};
pub use coord::{Coordinate, InvalidCoordinate};
pub use itinerary::{Itinerary, Plan};
pub use leg::{Leg, Place};
pub use mode::{ApiMode, LegMode, TransportMode};
