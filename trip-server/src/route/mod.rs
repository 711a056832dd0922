//! Itinerary selection and route-data transformation.
//!
//! The heart of the pipeline: choosing which candidate itinerary to
//! present, flattening its leg geometries into one drawable path, and
//! deriving the boarding-point markers the map and the departure
//! lookups consume.

mod boarding;
mod path;
mod select;

pub use boarding::extract_boarding_points;
pub use path::extract_path;
pub use select::select_itinerary;
