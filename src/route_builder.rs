//! Single-courier route construction.
//!
//! Greedy nearest-neighbor over pickup points: from the courier's current
//! position, take the unplaced task with the closest pickup, drive it to its
//! drop-off, repeat. Each task is one pickup-then-drop-off unit; legs of
//! different tasks are never interleaved.
//!
//! Priority and order value are carried through untouched and do not bias
//! the selection.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::estimator::DistanceEstimator;
use crate::geo_resolver::GeoResolver;
use crate::types::{
    Coordinate, DeliveryTask, Route, RoutePlan, RouteStop, TravelMode, TravelSource, UnresolvedReason,
    UnresolvedTask,
};

/// A task whose pickup and drop-off both resolved.
#[derive(Debug, Clone)]
struct ResolvedTask<'a> {
    task: &'a DeliveryTask,
    pickup: Coordinate,
    dropoff: Coordinate,
}

/// Build a route for a courier starting at `start`.
///
/// Tasks whose pickup or drop-off cannot be resolved are left out of the
/// route and listed in [`RoutePlan::unresolved`]. A non-finite `start` gives
/// an empty plan. Deterministic for identical inputs: ties in pickup
/// distance go to the earlier task.
pub fn build_route(
    start: Coordinate,
    tasks: &[DeliveryTask],
    resolver: &GeoResolver,
    estimator: &DistanceEstimator,
) -> RoutePlan {
    if tasks.is_empty() {
        return RoutePlan::default();
    }
    if !start.is_finite() {
        warn!(?start, "courier start is not a finite coordinate");
        return RoutePlan::default();
    }

    let (mut remaining, unresolved) = resolve_tasks(tasks, resolver);
    let mut stops = Vec::with_capacity(remaining.len());
    let mut current = start;

    while let Some(index) = nearest_pickup(current, &remaining, estimator) {
        let next = remaining.remove(index);

        let to_pickup = estimator.travel_time(current, next.pickup, TravelMode::Driving);
        let to_dropoff = estimator.travel_time(next.pickup, next.dropoff, TravelMode::Driving);
        let time_source = if to_pickup.source == TravelSource::Provider
            && to_dropoff.source == TravelSource::Provider
        {
            TravelSource::Provider
        } else {
            TravelSource::Estimated
        };

        stops.push(RouteStop {
            task: next.task.clone(),
            pickup: next.pickup,
            dropoff: next.dropoff,
            estimated_pickup_time_minutes: to_pickup.minutes,
            estimated_delivery_time_minutes: to_dropoff.minutes,
            total_time_minutes: to_pickup.minutes.saturating_add(to_dropoff.minutes),
            time_source,
        });
        current = next.dropoff;
    }

    debug!(
        placed = stops.len(),
        dropped = unresolved.len(),
        "route built"
    );

    RoutePlan {
        route: Route::new(stops),
        unresolved,
    }
}

/// Geocode both ends of every task in parallel, keeping input order.
fn resolve_tasks<'a>(
    tasks: &'a [DeliveryTask],
    resolver: &GeoResolver,
) -> (Vec<ResolvedTask<'a>>, Vec<UnresolvedTask>) {
    let outcomes: Vec<Result<ResolvedTask<'a>, UnresolvedTask>> = tasks
        .par_iter()
        .map(|task| {
            let pickup = resolver.resolve(&task.pickup);
            let dropoff = resolver.resolve(&task.dropoff);
            match (pickup, dropoff) {
                (Some(pickup), Some(dropoff)) => Ok(ResolvedTask {
                    task,
                    pickup,
                    dropoff,
                }),
                (pickup, dropoff) => {
                    let reason = match (pickup.is_none(), dropoff.is_none()) {
                        (true, true) => UnresolvedReason::PickupAndDropoff,
                        (true, false) => UnresolvedReason::Pickup,
                        _ => UnresolvedReason::Dropoff,
                    };
                    Err(UnresolvedTask {
                        task_id: task.id,
                        reason,
                    })
                }
            }
        })
        .collect();

    let mut resolved = Vec::with_capacity(outcomes.len());
    let mut unresolved = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(task) => resolved.push(task),
            Err(dropped) => {
                warn!(task_id = dropped.task_id, reason = ?dropped.reason, "dropping unresolvable task");
                unresolved.push(dropped);
            }
        }
    }
    (resolved, unresolved)
}

/// Index of the task whose pickup is closest to `current`; first wins ties.
fn nearest_pickup(
    current: Coordinate,
    remaining: &[ResolvedTask<'_>],
    estimator: &DistanceEstimator,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in remaining.iter().enumerate() {
        let distance = estimator.distance_km(current, candidate.pickup);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}
