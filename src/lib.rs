//! courier-dispatch core
//!
//! Route construction and driver assignment for delivery couriers:
//! geocoding with graceful failure, provider-first travel times with a
//! distance heuristic fallback, nearest-neighbor route sequencing, route
//! metrics, driver scoring, a demand heuristic, and batch optimization.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;
pub mod haversine;
pub mod nominatim;
pub mod osrm;
pub mod google;
pub mod geo_resolver;
pub mod estimator;
pub mod route_builder;
pub mod metrics;
pub mod driver_selector;
pub mod demand;
pub mod batch;
pub mod dispatcher;

pub use dispatcher::Dispatcher;
pub use error::{ConfigError, DispatchError, ProviderError};
pub use types::{Coordinate, Location};
