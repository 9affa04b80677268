//! Test fixtures for courier-dispatch.
//!
//! Provides:
//! - Real Las Vegas locations (from OpenStreetMap)
//! - In-memory geocoders and travel time providers

pub mod las_vegas_locations;
pub mod providers;

pub use las_vegas_locations::*;
pub use providers::*;
