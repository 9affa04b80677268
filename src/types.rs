//! Plain data records exchanged with the dispatch engine.
//!
//! Everything here is serde-friendly so callers can move it over JSON
//! without an extra DTO layer.

use serde::{Deserialize, Serialize};

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Where something is: either already a coordinate or an address to geocode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Coordinate(Coordinate),
    Address(String),
}

impl Location {
    pub fn address(address: impl Into<String>) -> Self {
        Location::Address(address.into())
    }

    pub const fn at(latitude: f64, longitude: f64) -> Self {
        Location::Coordinate(Coordinate::new(latitude, longitude))
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Location::Coordinate(coordinate)
    }
}

impl From<&str> for Location {
    fn from(address: &str) -> Self {
        Location::Address(address.to_string())
    }
}

impl From<String> for Location {
    fn from(address: String) -> Self {
        Location::Address(address)
    }
}

/// Delivery urgency. Accepted on input but not used to bias sequencing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

/// A pickup/drop-off pair waiting to be routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTask {
    pub id: u64,
    pub pickup: Location,
    pub dropoff: Location,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_prep_time")]
    pub estimated_prep_time_minutes: u32,
    #[serde(default)]
    pub order_value: f64,
}

fn default_prep_time() -> u32 {
    15
}

impl DeliveryTask {
    pub fn new(id: u64, pickup: Location, dropoff: Location) -> Self {
        Self {
            id,
            pickup,
            dropoff,
            priority: Priority::Normal,
            estimated_prep_time_minutes: default_prep_time(),
            order_value: 0.0,
        }
    }
}

/// Travel mode requested from the routing provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

/// Where a travel time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelSource {
    /// Answered by the external routing provider.
    Provider,
    /// Provider missing or failed; the distance heuristic was used.
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub minutes: u32,
    pub source: TravelSource,
    pub mode: TravelMode,
}

/// A task placed on a route, with resolved coordinates and leg timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub task: DeliveryTask,
    pub pickup: Coordinate,
    pub dropoff: Coordinate,
    /// Minutes from the previous position to the pickup.
    pub estimated_pickup_time_minutes: u32,
    /// Minutes from the pickup to the drop-off.
    pub estimated_delivery_time_minutes: u32,
    pub total_time_minutes: u32,
    pub time_source: TravelSource,
}

/// Ordered stops; the order is the courier's visiting sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    pub fn new(stops: Vec<RouteStop>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn task_ids(&self) -> Vec<u64> {
        self.stops.iter().map(|stop| stop.task.id).collect()
    }

    pub fn into_stops(self) -> Vec<RouteStop> {
        self.stops
    }
}

/// Which end of a task failed to geocode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    Pickup,
    Dropoff,
    PickupAndDropoff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedTask {
    pub task_id: u64,
    pub reason: UnresolvedReason,
}

/// Output of the route builder: the route plus the tasks it had to drop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub route: Route,
    pub unresolved: Vec<UnresolvedTask>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance_km: f64,
    pub total_time_minutes: u32,
    pub total_deliveries: usize,
    pub average_time_per_delivery: f64,
    /// Deliveries per 100 minutes. Higher is better.
    pub efficiency_score: f64,
}

impl RouteSummary {
    /// The summary reported when metrics cannot be computed.
    pub fn zeroed(total_deliveries: usize) -> Self {
        Self {
            total_deliveries,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    pub route: Route,
    pub summary: RouteSummary,
    pub unresolved: Vec<UnresolvedTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverCandidate {
    pub id: u64,
    pub current_location: Location,
    #[serde(default)]
    pub active_delivery_count: u32,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default = "default_capacity")]
    pub max_capacity: u32,
}

fn default_rating() -> f64 {
    5.0
}

fn default_capacity() -> u32 {
    5
}

impl DriverCandidate {
    pub fn new(id: u64, current_location: Location) -> Self {
        Self {
            id,
            current_location,
            active_delivery_count: 0,
            rating: default_rating(),
            max_capacity: default_capacity(),
        }
    }
}

/// The winning candidate plus how it was scored. Lower score is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub driver: DriverCandidate,
    pub resolved_location: Coordinate,
    pub distance_to_pickup_km: f64,
    pub estimated_arrival_minutes: u32,
    pub assignment_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandFactors {
    pub time_factor: f64,
    pub day_factor: f64,
    pub weather_factor: f64,
}

/// Coarse demand guess. `confidence_score` is fixed, not calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    pub area: Coordinate,
    pub predicted_orders: u32,
    pub time_window_minutes: u32,
    pub confidence_score: f64,
    pub factors: DemandFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub distance_km: f64,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub courier_id: u64,
    pub courier_start: Location,
    #[serde(default)]
    pub tasks: Vec<DeliveryTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub courier_id: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RouteSummary>,
    #[serde(default)]
    pub unresolved: Vec<UnresolvedTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<BatchResult>,
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
}
