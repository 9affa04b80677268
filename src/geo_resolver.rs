//! Location resolution with a coordinate fast path.
//!
//! Coordinates pass straight through; addresses go to the geocoder. Any
//! geocoder failure becomes `None` so one bad address never sinks a request.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::traits::Geocoder;
use crate::types::{Coordinate, Location};

#[derive(Clone)]
pub struct GeoResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver").finish_non_exhaustive()
    }
}

impl GeoResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve a location to a coordinate, or `None` when it cannot be found.
    ///
    /// A supplied coordinate is returned unchanged unless it is non-finite,
    /// in which case it counts as unresolvable.
    pub fn resolve(&self, location: &Location) -> Option<Coordinate> {
        match location {
            Location::Coordinate(coordinate) if coordinate.is_finite() => Some(*coordinate),
            Location::Coordinate(coordinate) => {
                warn!(?coordinate, "rejecting non-finite coordinate");
                None
            }
            Location::Address(address) => self.geocode(address),
        }
    }

    fn geocode(&self, address: &str) -> Option<Coordinate> {
        match self.geocoder.geocode(address) {
            Ok(Some(coordinate)) if coordinate.is_finite() => Some(coordinate),
            Ok(Some(coordinate)) => {
                warn!(address, ?coordinate, "geocoder returned a non-finite coordinate");
                None
            }
            Ok(None) => {
                debug!(address, "address not found");
                None
            }
            Err(err) => {
                warn!(address, error = %err, "geocoding failed");
                None
            }
        }
    }
}

/// Read-through cache in front of another geocoder.
///
/// Keyed by the exact address string, so every spelling the cache has not
/// seen reaches the inner geocoder. Only successful lookups are stored, so a
/// miss or an earlier failure always goes back to the inner geocoder.
pub struct CachingGeocoder<G> {
    inner: G,
    hits: RwLock<HashMap<String, Coordinate>>,
}

impl<G: Geocoder> CachingGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            hits: RwLock::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.hits.read().len()
    }
}

impl<G: Geocoder> Geocoder for CachingGeocoder<G> {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        if let Some(coordinate) = self.hits.read().get(address) {
            debug!(address, "geocode cache hit");
            return Ok(Some(*coordinate));
        }

        let found = self.inner.geocode(address)?;
        if let Some(coordinate) = found {
            self.hits.write().insert(address.to_string(), coordinate);
        }
        Ok(found)
    }
}
