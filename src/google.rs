//! Google Distance Matrix adapter.
//!
//! Only the first origin/destination element is used; the engine always
//! asks point-to-point questions.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::TravelTimeProvider;
use crate::types::{Coordinate, TravelMode};

#[derive(Debug, Clone, PartialEq)]
pub struct GoogleConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleDistanceMatrix {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GoogleDistanceMatrix {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build from config; `None` when no API key is configured.
    pub fn from_config(config: &GoogleConfig) -> Result<Option<Self>, reqwest::Error> {
        config
            .api_key
            .as_ref()
            .map(|key| Self::new(config.base_url.clone(), key.clone(), config.timeout_secs))
            .transpose()
    }
}

fn as_param(coordinate: Coordinate) -> String {
    format!("{:.6},{:.6}", coordinate.latitude, coordinate.longitude)
}

impl TravelTimeProvider for GoogleDistanceMatrix {
    fn travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<u32, ProviderError> {
        let url = format!(
            "{}/maps/api/distancematrix/json",
            self.base_url.trim_end_matches('/')
        );
        let origins = as_param(origin);
        let destinations = as_param(destination);

        let response = self
            .client
            .get(url)
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("mode", mode.as_str()),
                ("units", "metric"),
                ("key", self.api_key.as_str()),
            ])
            .send()?
            .error_for_status()
            .map_err(|err| match err.status() {
                Some(status) => ProviderError::Status {
                    status: status.as_u16(),
                },
                None => ProviderError::Transport(err),
            })?;

        parse_matrix_body(&response.text()?)
    }
}

pub(crate) fn parse_matrix_body(body: &str) -> Result<u32, ProviderError> {
    let parsed: MatrixResponse = serde_json::from_str(body)?;
    if parsed.status != "OK" {
        return Err(ProviderError::Rejected {
            status: parsed.status,
        });
    }

    let element = parsed
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| ProviderError::Malformed("empty rows or elements".to_string()))?;

    match element.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Err(ProviderError::NoRoute),
        other => {
            return Err(ProviderError::Rejected {
                status: other.to_string(),
            });
        }
    }

    element
        .duration
        .as_ref()
        .map(|duration| duration.value / 60)
        .ok_or_else(|| ProviderError::Malformed("element without duration".to_string()))
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    duration: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    value: u32,
}
