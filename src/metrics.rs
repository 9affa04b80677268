//! Route summary statistics.

use thiserror::Error;
use tracing::warn;

use crate::haversine;
use crate::types::{Route, RouteStop, RouteSummary};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("stop for task {task_id} has a non-finite coordinate")]
    NonFiniteCoordinate { task_id: u64 },

    #[error("route totals are not finite")]
    NonFiniteTotal,
}

/// Summarize a route.
///
/// Never fails: if the totals cannot be computed the zeroed summary is
/// returned, still carrying the real delivery count.
pub fn summarize(route: &Route) -> RouteSummary {
    match try_summarize(route) {
        Ok(summary) => summary,
        Err(err) => {
            warn!(error = %err, stops = route.len(), "route metrics degraded to zero");
            RouteSummary::zeroed(route.len())
        }
    }
}

/// Summarize a route, reporting why if the numbers come out unusable.
pub fn try_summarize(route: &Route) -> Result<RouteSummary, MetricsError> {
    let stops = route.stops();
    let mut total_distance_km = 0.0;
    let mut total_time_minutes: u32 = 0;
    let mut previous: Option<&RouteStop> = None;

    for stop in stops {
        if !(stop.pickup.is_finite() && stop.dropoff.is_finite()) {
            return Err(MetricsError::NonFiniteCoordinate {
                task_id: stop.task.id,
            });
        }

        total_time_minutes = total_time_minutes.saturating_add(stop.total_time_minutes);
        if let Some(previous) = previous {
            total_distance_km += haversine::distance_km(previous.dropoff, stop.pickup);
        }
        total_distance_km += haversine::distance_km(stop.pickup, stop.dropoff);
        previous = Some(stop);
    }

    if !total_distance_km.is_finite() {
        return Err(MetricsError::NonFiniteTotal);
    }

    let total_deliveries = stops.len();
    let deliveries = total_deliveries as f64;
    let minutes = f64::from(total_time_minutes);

    Ok(RouteSummary {
        total_distance_km: round2(total_distance_km),
        total_time_minutes,
        total_deliveries,
        average_time_per_delivery: round2(minutes / deliveries.max(1.0)),
        efficiency_score: round2(deliveries / minutes.max(1.0) * 100.0),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinate, DeliveryTask, Location, TravelSource};

    fn stop(id: u64, pickup: (f64, f64), dropoff: (f64, f64), pickup_min: u32, delivery_min: u32) -> RouteStop {
        RouteStop {
            task: DeliveryTask::new(id, Location::at(pickup.0, pickup.1), Location::at(dropoff.0, dropoff.1)),
            pickup: Coordinate::new(pickup.0, pickup.1),
            dropoff: Coordinate::new(dropoff.0, dropoff.1),
            estimated_pickup_time_minutes: pickup_min,
            estimated_delivery_time_minutes: delivery_min,
            total_time_minutes: pickup_min + delivery_min,
            time_source: TravelSource::Estimated,
        }
    }

    #[test]
    fn empty_route_has_zero_totals() {
        let summary = summarize(&Route::default());
        assert_eq!(summary, RouteSummary::zeroed(0));
    }

    #[test]
    fn totals_include_inter_and_in_task_legs() {
        let route = Route::new(vec![
            stop(1, (0.0, 0.0), (0.0, 0.1), 10, 20),
            stop(2, (0.0, 0.2), (0.0, 0.3), 5, 25),
        ]);
        let summary = summarize(&route);

        let expected = haversine::distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.1))
            + haversine::distance_km(Coordinate::new(0.0, 0.1), Coordinate::new(0.0, 0.2))
            + haversine::distance_km(Coordinate::new(0.0, 0.2), Coordinate::new(0.0, 0.3));

        assert_eq!(summary.total_deliveries, 2);
        assert_eq!(summary.total_time_minutes, 60);
        assert_eq!(summary.total_distance_km, round2(expected));
        assert_eq!(summary.average_time_per_delivery, 30.0);
        assert_eq!(summary.efficiency_score, 3.33);
    }

    #[test]
    fn first_stop_has_no_inter_task_leg() {
        let route = Route::new(vec![stop(1, (0.0, 5.0), (0.0, 5.1), 10, 10)]);
        let summary = summarize(&route);
        let in_task = haversine::distance_km(Coordinate::new(0.0, 5.0), Coordinate::new(0.0, 5.1));
        assert_eq!(summary.total_distance_km, round2(in_task));
    }

    #[test]
    fn corrupt_stop_degrades_to_zero_summary() {
        let route = Route::new(vec![
            stop(1, (0.0, 0.0), (0.0, 0.1), 10, 20),
            stop(2, (f64::NAN, 0.2), (0.0, 0.3), 5, 25),
            stop(3, (0.0, 0.4), (0.0, 0.5), 5, 25),
        ]);
        assert_eq!(
            try_summarize(&route),
            Err(MetricsError::NonFiniteCoordinate { task_id: 2 })
        );

        let summary = summarize(&route);
        assert_eq!(summary.total_deliveries, 3);
        assert_eq!(summary.total_time_minutes, 0);
        assert_eq!(summary.total_distance_km, 0.0);
        assert_eq!(summary.efficiency_score, 0.0);
    }
}
