//! Facade over the engine components.
//!
//! A `Dispatcher` owns its provider clients and a bounded worker pool. Every
//! operation runs inside that pool, so the pool size caps how many provider
//! calls are in flight at once. Nothing here returns an error once the
//! dispatcher is built; failures shrink results instead.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::batch;
use crate::config::{DispatchConfig, RoutingBackend};
use crate::demand;
use crate::driver_selector;
use crate::error::DispatchError;
use crate::estimator::DistanceEstimator;
use crate::geo_resolver::{CachingGeocoder, GeoResolver};
use crate::google::GoogleDistanceMatrix;
use crate::haversine;
use crate::metrics;
use crate::nominatim::NominatimGeocoder;
use crate::osrm::OsrmClient;
use crate::route_builder;
use crate::traits::{Geocoder, TravelTimeProvider};
use crate::types::{
    AssignmentResult, BatchReport, BatchRequest, Coordinate, DeliveryTask, DemandEstimate, DistanceReport,
    DriverCandidate, Location, OptimizedRoute, TravelEstimate, TravelMode,
};

const MILES_PER_KM: f64 = 0.621371;

pub struct Dispatcher {
    config: DispatchConfig,
    resolver: GeoResolver,
    estimator: DistanceEstimator,
    pool: ThreadPool,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("estimator", &self.estimator)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Build with explicit collaborators.
    pub fn new(
        config: DispatchConfig,
        geocoder: Arc<dyn Geocoder>,
        travel_times: Option<Arc<dyn TravelTimeProvider>>,
    ) -> Result<Self, DispatchError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.max_concurrent_requests.max(1))
            .thread_name(|index| format!("dispatch-worker-{index}"))
            .build()?;

        Ok(Self {
            resolver: GeoResolver::new(geocoder),
            estimator: DistanceEstimator::new(travel_times, config.heuristic),
            config,
            pool,
        })
    }

    /// Build the HTTP adapters named by the config: a cached Nominatim
    /// geocoder and the selected routing backend, if any.
    pub fn from_config(config: DispatchConfig) -> Result<Self, DispatchError> {
        let geocoder = Arc::new(CachingGeocoder::new(NominatimGeocoder::new(&config.providers.nominatim)?));

        let travel_times: Option<Arc<dyn TravelTimeProvider>> = match config.providers.routing {
            RoutingBackend::None => None,
            RoutingBackend::Osrm => {
                Some(Arc::new(OsrmClient::new(config.providers.osrm.clone())?) as Arc<dyn TravelTimeProvider>)
            }
            RoutingBackend::Google => GoogleDistanceMatrix::from_config(&config.providers.google)?
                .map(|client| Arc::new(client) as Arc<dyn TravelTimeProvider>),
        };

        Self::new(config, geocoder, travel_times)
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Geocode a location; coordinates come back unchanged.
    pub fn resolve(&self, location: &Location) -> Option<Coordinate> {
        self.pool.install(|| self.resolver.resolve(location))
    }

    /// Order a courier's tasks and summarize the result. `None` when the
    /// courier's start does not resolve.
    pub fn optimize_route(&self, start: &Location, tasks: &[DeliveryTask]) -> Option<OptimizedRoute> {
        self.pool.install(|| {
            let start = self.resolver.resolve(start)?;
            let plan = route_builder::build_route(start, tasks, &self.resolver, &self.estimator);
            let summary = metrics::summarize(&plan.route);
            Some(OptimizedRoute {
                route: plan.route,
                summary,
                unresolved: plan.unresolved,
            })
        })
    }

    /// Best courier for a pickup, `None` if the pickup or every candidate
    /// fails to resolve.
    pub fn select_driver(&self, pickup: &Location, candidates: &[DriverCandidate]) -> Option<AssignmentResult> {
        self.pool.install(|| {
            let pickup = self.resolver.resolve(pickup)?;
            driver_selector::select_driver(
                pickup,
                candidates,
                &self.resolver,
                &self.estimator,
                &self.config.scoring,
            )
        })
    }

    /// Travel time between two locations. The heuristic fallback only
    /// applies once both ends have resolved.
    pub fn estimate_travel(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
    ) -> Option<TravelEstimate> {
        self.pool.install(|| {
            let origin = self.resolver.resolve(origin)?;
            let destination = self.resolver.resolve(destination)?;
            Some(self.estimator.travel_time(origin, destination, mode))
        })
    }

    /// Straight-line distance between two locations, `None` if either end
    /// does not resolve.
    pub fn distance_between(&self, origin: &Location, destination: &Location) -> Option<DistanceReport> {
        self.pool.install(|| {
            let origin = self.resolver.resolve(origin)?;
            let destination = self.resolver.resolve(destination)?;
            let km = haversine::distance_km(origin, destination);
            Some(DistanceReport {
                origin,
                destination,
                distance_km: round2(km),
                distance_miles: round2(km * MILES_PER_KM),
            })
        })
    }

    /// Demand around an area centre, `None` if the centre does not resolve.
    pub fn forecast_demand(&self, area: &Location, window_minutes: u32) -> Option<DemandEstimate> {
        self.pool.install(|| {
            let area = self.resolver.resolve(area)?;
            Some(demand::forecast(area, window_minutes, &self.config.demand))
        })
    }

    pub fn batch_optimize(&self, requests: &[BatchRequest]) -> BatchReport {
        self.pool
            .install(|| batch::run_batch(requests, &self.resolver, &self.estimator))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
