//! Engine configuration.
//!
//! Every policy constant the engine uses (heuristic speed, score weights,
//! demand factors) lives here with its observed default so it can be
//! overridden without touching the algorithms.

use std::env::VarError;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::google::GoogleConfig;
use crate::nominatim::NominatimConfig;
use crate::osrm::OsrmConfig;

/// Fallback travel-time heuristic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Average urban driving speed including stops.
    pub urban_speed_kmh: f64,
    /// Pickup/drop-off dwell time added to every leg.
    pub dwell_buffer_minutes: u32,
    /// Minimum handling time for any leg.
    pub min_travel_minutes: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            urban_speed_kmh: 25.0,
            dwell_buffer_minutes: 5,
            min_travel_minutes: 5,
        }
    }
}

/// Driver score weights. Lower total score wins.
///
/// The terms mix kilometers, minutes, a delivery count and a rating gap
/// without normalization; this is the observed production weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub distance: f64,
    pub eta: f64,
    pub active_delivery: f64,
    pub rating_gap: f64,
    pub max_rating: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 0.4,
            eta: 0.3,
            active_delivery: 5.0,
            rating_gap: 2.0,
            max_rating: 5.0,
        }
    }
}

/// An inclusive hour band and the multiplier applied inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourBand {
    pub first_hour: u32,
    pub last_hour: u32,
    pub factor: f64,
}

impl HourBand {
    pub const fn new(first_hour: u32, last_hour: u32, factor: f64) -> Self {
        Self {
            first_hour,
            last_hour,
            factor,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.first_hour..=self.last_hour).contains(&hour)
    }
}

/// Demand forecast heuristic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandConfig {
    pub base_orders: f64,
    /// Checked in order; the first band containing the hour wins.
    pub hour_bands: Vec<HourBand>,
    pub off_peak_factor: f64,
    pub weekend_factor: f64,
    pub weekday_factor: f64,
    /// Fixed; there is no live weather feed.
    pub weather_factor: f64,
    pub confidence: f64,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            base_orders: 10.0,
            hour_bands: vec![
                HourBand::new(11, 14, 2.0),
                HourBand::new(18, 21, 2.5),
                HourBand::new(21, 23, 1.5),
            ],
            off_peak_factor: 0.5,
            weekend_factor: 1.3,
            weekday_factor: 1.0,
            weather_factor: 1.2,
            confidence: 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingBackend {
    /// Heuristic only.
    #[default]
    None,
    Osrm,
    Google,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSettings {
    pub routing: RoutingBackend,
    pub osrm: OsrmConfig,
    pub google: GoogleConfig,
    pub nominatim: NominatimConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    pub heuristic: HeuristicConfig,
    pub scoring: ScoringWeights,
    pub demand: DemandConfig,
    pub providers: ProviderSettings,
    /// Upper bound on simultaneous outbound provider calls.
    pub max_concurrent_requests: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicConfig::default(),
            scoring: ScoringWeights::default(),
            demand: DemandConfig::default(),
            providers: ProviderSettings::default(),
            max_concurrent_requests: 8,
        }
    }
}

/// Load configuration from the environment, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` when a variable is present but cannot be parsed.
pub fn load_config() -> Result<DispatchConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Like [`load_config`] but without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` when a variable is present but cannot be parsed.
pub fn load_config_from_env() -> Result<DispatchConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Core parsing, decoupled from the process environment so tests can feed a map.
pub(crate) fn build_config<F>(lookup: F) -> Result<DispatchConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut config = DispatchConfig::default();

    let optional = |var: &str| lookup(var).ok().filter(|value| !value.trim().is_empty());

    if let Some(url) = optional("OSRM_BASE_URL") {
        config.providers.osrm.base_url = url;
    }
    if let Some(url) = optional("GOOGLE_MAPS_BASE_URL") {
        config.providers.google.base_url = url;
    }
    config.providers.google.api_key = optional("GOOGLE_MAPS_API_KEY");
    if let Some(url) = optional("NOMINATIM_BASE_URL") {
        config.providers.nominatim.base_url = url;
    }
    if let Some(agent) = optional("NOMINATIM_USER_AGENT") {
        config.providers.nominatim.user_agent = agent;
    }

    if let Some(secs) = parse_var::<u64>(&optional, "PROVIDER_TIMEOUT_SECS")? {
        config.providers.osrm.timeout_secs = secs;
        config.providers.google.timeout_secs = secs;
        config.providers.nominatim.timeout_secs = secs;
    }
    if let Some(secs) = parse_var::<u64>(&optional, "OSRM_TIMEOUT_SECS")? {
        config.providers.osrm.timeout_secs = secs;
    }

    config.providers.routing = match optional("DISPATCH_ROUTING_BACKEND") {
        Some(raw) => parse_backend(&raw)?,
        None if config.providers.google.api_key.is_some() => RoutingBackend::Google,
        None => RoutingBackend::None,
    };
    if config.providers.routing == RoutingBackend::Google
        && config.providers.google.api_key.is_none()
    {
        return Err(ConfigError::MissingEnvVar("GOOGLE_MAPS_API_KEY".to_string()));
    }

    if let Some(workers) = parse_var::<usize>(&optional, "DISPATCH_MAX_CONCURRENCY")? {
        if workers == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: "DISPATCH_MAX_CONCURRENCY".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        config.max_concurrent_requests = workers;
    }

    if let Some(speed) = parse_var::<f64>(&optional, "DISPATCH_URBAN_SPEED_KMH")? {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::InvalidEnvVar {
                var: "DISPATCH_URBAN_SPEED_KMH".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        config.heuristic.urban_speed_kmh = speed;
    }

    Ok(config)
}

fn parse_var<T>(
    optional: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

pub(crate) fn parse_backend(raw: &str) -> Result<RoutingBackend, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" | "heuristic" => Ok(RoutingBackend::None),
        "osrm" => Ok(RoutingBackend::Osrm),
        "google" => Ok(RoutingBackend::Google),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DISPATCH_ROUTING_BACKEND".to_string(),
            reason: format!("unknown backend \"{other}\", expected none, osrm or google"),
        }),
    }
}
