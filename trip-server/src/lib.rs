//! Urban trip planning service.
//!
//! Plans door-to-door trips over an OTP-style journey planner, draws
//! the route geometry, extracts transit boarding points, and matches
//! them against the network's real-time departure feed.

pub mod domain;
pub mod enviro;
pub mod geocode;
pub mod geometry;
pub mod otp;
pub mod pipeline;
pub mod route;
pub mod stops;
pub mod web;
