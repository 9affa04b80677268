//! OpenStreetMap Nominatim geocoding adapter.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::Geocoder;
use crate::types::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "courier-dispatch".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl NominatimGeocoder {
    pub fn new(config: &NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        if address.trim().is_empty() {
            return Ok(None);
        }

        let body = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()
            .map_err(|err| match err.status() {
                Some(status) => ProviderError::Status {
                    status: status.as_u16(),
                },
                None => ProviderError::Transport(err),
            })?
            .text()?;

        parse_search_body(&body)
    }
}

pub(crate) fn parse_search_body(body: &str) -> Result<Option<Coordinate>, ProviderError> {
    let places: Vec<Place> = serde_json::from_str(body)?;
    let Some(place) = places.first() else {
        return Ok(None);
    };

    let latitude = parse_degrees("lat", &place.lat)?;
    let longitude = parse_degrees("lon", &place.lon)?;
    Ok(Some(Coordinate::new(latitude, longitude)))
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, ProviderError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ProviderError::Malformed(format!("{field} = {raw:?}")))
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}
