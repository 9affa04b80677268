//! OSRM HTTP adapter for point-to-point travel times.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::TravelTimeProvider;
use crate::types::{Coordinate, TravelMode};

#[derive(Debug, Clone, PartialEq)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, profile: &str, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }
}

/// OSRM profile name for a travel mode.
fn profile_for(mode: TravelMode) -> Option<&'static str> {
    match mode {
        TravelMode::Driving => Some("car"),
        TravelMode::Walking => Some("foot"),
        TravelMode::Bicycling => Some("bike"),
        TravelMode::Transit => None,
    }
}

impl TravelTimeProvider for OsrmClient {
    fn travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<u32, ProviderError> {
        let profile = profile_for(mode)
            .ok_or_else(|| ProviderError::Unsupported(format!("OSRM has no {} profile", mode.as_str())))?;

        let response = self
            .client
            .get(self.route_url(profile, origin, destination))
            .send()?;
        let status = response.status();
        let body = response.text()?;

        parse_route_body(status.as_u16(), &body)
    }
}

/// Interpret an OSRM `route` response.
///
/// OSRM reports errors such as `NoRoute` with a 4xx status and a JSON body,
/// so the body code is checked before the HTTP status.
pub(crate) fn parse_route_body(status: u16, body: &str) -> Result<u32, ProviderError> {
    let parsed = match serde_json::from_str::<OsrmRouteResponse>(body) {
        Ok(parsed) => parsed,
        Err(_) if !(200..300).contains(&status) => return Err(ProviderError::Status { status }),
        Err(err) => return Err(err.into()),
    };

    match parsed.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Err(ProviderError::NoRoute),
        other => {
            return Err(ProviderError::Rejected {
                status: other.to_string(),
            });
        }
    }

    let duration = parsed
        .routes
        .first()
        .map(|route| route.duration)
        .ok_or(ProviderError::NoRoute)?;
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(ProviderError::Malformed(format!("duration {duration}")));
    }

    Ok((duration / 60.0).floor() as u32)
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: f64,
}
