//! Courier selection for a pickup.
//!
//! score = w_d * km + w_e * eta_minutes + w_a * active_deliveries
//!       + w_r * (max_rating - rating)
//!
//! Lowest score wins; ties go to the earlier candidate. Candidates whose
//! location does not resolve are skipped, and a non-finite pickup selects
//! nobody.

use tracing::{debug, warn};

use crate::config::ScoringWeights;
use crate::estimator::DistanceEstimator;
use crate::geo_resolver::GeoResolver;
use crate::types::{AssignmentResult, Coordinate, DriverCandidate, TravelMode};

/// Pick the best candidate for `pickup`, or `None` if nobody resolves.
pub fn select_driver(
    pickup: Coordinate,
    candidates: &[DriverCandidate],
    resolver: &GeoResolver,
    estimator: &DistanceEstimator,
    weights: &ScoringWeights,
) -> Option<AssignmentResult> {
    if !pickup.is_finite() {
        warn!(?pickup, "pickup is not a finite coordinate");
        return None;
    }

    let mut best: Option<AssignmentResult> = None;

    for candidate in candidates {
        let Some(location) = resolver.resolve(&candidate.current_location) else {
            debug!(driver_id = candidate.id, "skipping driver with unresolvable location");
            continue;
        };

        let distance = estimator.distance_km(location, pickup);
        let eta = estimator.travel_time(location, pickup, TravelMode::Driving).minutes;
        let candidate_score = score(distance, eta, candidate, weights);

        let better = best
            .as_ref()
            .is_none_or(|current| candidate_score < current.assignment_score);
        if better {
            best = Some(AssignmentResult {
                driver: candidate.clone(),
                resolved_location: location,
                distance_to_pickup_km: distance,
                estimated_arrival_minutes: eta,
                assignment_score: candidate_score,
            });
        }
    }

    if let Some(chosen) = &best {
        debug!(
            driver_id = chosen.driver.id,
            score = chosen.assignment_score,
            "selected driver"
        );
    }
    best
}

/// Weighted score for one candidate. Lower is better.
pub fn score(distance_km: f64, eta_minutes: u32, candidate: &DriverCandidate, weights: &ScoringWeights) -> f64 {
    weights.distance * distance_km
        + weights.eta * f64::from(eta_minutes)
        + weights.active_delivery * f64::from(candidate.active_delivery_count)
        + weights.rating_gap * (weights.max_rating - candidate.rating)
}
