//! Distance and travel time estimation.
//!
//! Travel time asks the routing provider first and falls back to the
//! haversine heuristic on any provider failure. The source of every answer
//! is reported in [`TravelEstimate::source`].

use std::sync::Arc;

use tracing::debug;

use crate::config::HeuristicConfig;
use crate::haversine;
use crate::traits::TravelTimeProvider;
use crate::types::{Coordinate, TravelEstimate, TravelMode, TravelSource};

#[derive(Clone, Default)]
pub struct DistanceEstimator {
    provider: Option<Arc<dyn TravelTimeProvider>>,
    heuristic: HeuristicConfig,
}

impl std::fmt::Debug for DistanceEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceEstimator")
            .field("has_provider", &self.provider.is_some())
            .field("heuristic", &self.heuristic)
            .finish()
    }
}

impl DistanceEstimator {
    pub fn new(provider: Option<Arc<dyn TravelTimeProvider>>, heuristic: HeuristicConfig) -> Self {
        Self {
            provider,
            heuristic,
        }
    }

    /// Heuristic only; never calls out.
    pub fn heuristic_only(heuristic: HeuristicConfig) -> Self {
        Self::new(None, heuristic)
    }

    pub fn heuristic(&self) -> &HeuristicConfig {
        &self.heuristic
    }

    /// Great-circle distance in kilometers.
    pub fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        haversine::distance_km(a, b)
    }

    /// Provider travel time, or the heuristic when the provider is absent
    /// or fails in any way.
    pub fn travel_time(&self, origin: Coordinate, destination: Coordinate, mode: TravelMode) -> TravelEstimate {
        if let Some(provider) = &self.provider {
            match provider.travel_time(origin, destination, mode) {
                Ok(minutes) => {
                    return TravelEstimate {
                        minutes,
                        source: TravelSource::Provider,
                        mode,
                    };
                }
                Err(err) => {
                    debug!(error = %err, ?origin, ?destination, "routing provider failed, using heuristic");
                }
            }
        }

        TravelEstimate {
            minutes: self.estimate_minutes(origin, destination),
            source: TravelSource::Estimated,
            mode,
        }
    }

    /// Driving minutes; the number-only view of [`Self::travel_time`].
    pub fn travel_time_minutes(&self, origin: Coordinate, destination: Coordinate) -> u32 {
        self.travel_time(origin, destination, TravelMode::Driving).minutes
    }

    /// The fallback heuristic on its own.
    pub fn estimate_minutes(&self, origin: Coordinate, destination: Coordinate) -> u32 {
        haversine::estimate_minutes(origin, destination, &self.heuristic)
    }
}
