//! In-memory collaborators for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use courier_dispatch::traits::{Geocoder, TravelTimeProvider};
use courier_dispatch::types::TravelMode;
use courier_dispatch::{Coordinate, ProviderError};

use super::las_vegas_locations::{all_places, Place};

/// Geocodes place names from a fixed table; anything else is not found.
pub struct TableGeocoder {
    table: HashMap<String, Coordinate>,
    calls: AtomicUsize,
}

impl TableGeocoder {
    pub fn new(places: &[Place]) -> Self {
        Self {
            table: places
                .iter()
                .map(|place| (place.name.to_string(), place.coordinate()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn las_vegas() -> Self {
        Self::new(&all_places())
    }

    pub fn with(mut self, address: &str, coordinate: Coordinate) -> Self {
        self.table.insert(address.to_string(), coordinate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if address == "provider outage" {
            return Err(ProviderError::Status { status: 503 });
        }
        Ok(self.table.get(address).copied())
    }
}

/// Answers every query with the same number of minutes.
pub struct ConstantTravelTime(pub u32);

impl TravelTimeProvider for ConstantTravelTime {
    fn travel_time(&self, _: Coordinate, _: Coordinate, _: TravelMode) -> Result<u32, ProviderError> {
        Ok(self.0)
    }
}

/// Always fails, the way an unreachable or misbehaving provider would.
pub struct BrokenTravelTime;

impl TravelTimeProvider for BrokenTravelTime {
    fn travel_time(&self, _: Coordinate, _: Coordinate, _: TravelMode) -> Result<u32, ProviderError> {
        Err(ProviderError::Malformed("unexpected end of JSON input".to_string()))
    }
}
