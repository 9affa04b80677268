//! Collaborator seams for the dispatch engine.
//!
//! The engine never talks HTTP directly; it goes through these two traits.
//! The bundled adapters live in [`crate::nominatim`], [`crate::osrm`] and
//! [`crate::google`], and tests plug in their own in-memory versions.

use crate::error::ProviderError;
use crate::types::{Coordinate, TravelMode};

/// Turns a free-text address into a coordinate.
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the provider answered but found nothing.
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError>;
}

/// Answers point-to-point travel time questions.
pub trait TravelTimeProvider: Send + Sync {
    /// Travel time in whole minutes.
    ///
    /// A provider that knows there is no route must say so with
    /// [`ProviderError::NoRoute`] rather than a transport error.
    fn travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<u32, ProviderError>;
}

/// A geocoder that never finds anything. Useful when every input is
/// expected to carry coordinates already.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    fn geocode(&self, _address: &str) -> Result<Option<Coordinate>, ProviderError> {
        Ok(None)
    }
}
