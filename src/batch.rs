//! Route optimization for many couriers at once.
//!
//! Requests are independent and run in parallel; a request that fails only
//! produces a failure record for itself. Results keep request order.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::estimator::DistanceEstimator;
use crate::geo_resolver::GeoResolver;
use crate::metrics;
use crate::route_builder::build_route;
use crate::types::{BatchReport, BatchRequest, BatchResult};

pub fn run_batch(requests: &[BatchRequest], resolver: &GeoResolver, estimator: &DistanceEstimator) -> BatchReport {
    let results: Vec<BatchResult> = requests
        .par_iter()
        .map(|request| run_one(request, resolver, estimator))
        .collect();

    let successful = results.iter().filter(|result| result.success).count();
    let report = BatchReport {
        total_processed: requests.len(),
        successful,
        failed: results.len() - successful,
        results,
    };
    info!(
        total = report.total_processed,
        successful = report.successful,
        failed = report.failed,
        "batch optimization finished"
    );
    report
}

fn run_one(request: &BatchRequest, resolver: &GeoResolver, estimator: &DistanceEstimator) -> BatchResult {
    let Some(start) = resolver.resolve(&request.courier_start) else {
        warn!(courier_id = request.courier_id, "could not resolve courier start location");
        return BatchResult {
            courier_id: request.courier_id,
            success: false,
            route: None,
            summary: None,
            unresolved: Vec::new(),
            error: Some("could not resolve courier start location".to_string()),
        };
    };

    let plan = build_route(start, &request.tasks, resolver, estimator);
    let summary = metrics::summarize(&plan.route);

    BatchResult {
        courier_id: request.courier_id,
        success: true,
        route: Some(plan.route),
        summary: Some(summary),
        unresolved: plan.unresolved,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::HeuristicConfig;
    use crate::traits::NoGeocoder;
    use crate::types::{DeliveryTask, Location};

    fn request(courier_id: u64, start: Location, tasks: usize) -> BatchRequest {
        BatchRequest {
            courier_id,
            courier_start: start,
            tasks: (0..tasks as u64)
                .map(|i| {
                    let offset = i as f64 * 0.01;
                    DeliveryTask::new(i, Location::at(0.0, offset), Location::at(0.01, offset))
                })
                .collect(),
        }
    }

    #[test]
    fn failures_are_isolated_and_order_is_kept() {
        let resolver = GeoResolver::new(Arc::new(NoGeocoder));
        let estimator = DistanceEstimator::heuristic_only(HeuristicConfig::default());
        let requests = vec![
            request(10, Location::at(0.0, 0.0), 2),
            request(11, Location::address("unknown depot"), 3),
            request(12, Location::at(0.0, 0.0), 0),
            request(13, Location::at(0.0, 0.0), 4),
        ];

        let report = run_batch(&requests, &resolver, &estimator);

        assert_eq!(report.results.len(), requests.len());
        let ids: Vec<u64> = report.results.iter().map(|r| r.courier_id).collect();
        assert_eq!(ids, vec![10, 11, 12, 13]);
        assert_eq!(report.total_processed, 4);
        assert_eq!(report.successful, 3);
        assert_eq!(report.failed, 1);

        let failed = &report.results[1];
        assert!(!failed.success);
        assert!(failed.route.is_none());
        assert!(failed.error.is_some());

        let empty = &report.results[2];
        assert!(empty.success);
        assert_eq!(empty.summary.map(|s| s.total_deliveries), Some(0));

        let last = &report.results[3];
        assert_eq!(last.route.as_ref().map(|r| r.len()), Some(4));
        assert_eq!(last.summary.map(|s| s.total_deliveries), Some(4));
    }

    #[test]
    fn empty_batch_gives_empty_report() {
        let resolver = GeoResolver::new(Arc::new(NoGeocoder));
        let report = run_batch(&[], &resolver, &DistanceEstimator::default());
        assert!(report.results.is_empty());
        assert_eq!(report.total_processed, 0);
    }
}
