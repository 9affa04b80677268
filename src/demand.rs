//! Placeholder demand forecast from time-of-day and day-of-week.
//!
//! Not a statistical model; the confidence score is a constant.

use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};

use crate::config::DemandConfig;
use crate::types::{Coordinate, DemandEstimate, DemandFactors};

/// Forecast for the current local time.
pub fn forecast(area: Coordinate, window_minutes: u32, config: &DemandConfig) -> DemandEstimate {
    forecast_at(area, window_minutes, Local::now().naive_local(), config)
}

/// Forecast for an explicit local date and time.
pub fn forecast_at(
    area: Coordinate,
    window_minutes: u32,
    at: NaiveDateTime,
    config: &DemandConfig,
) -> DemandEstimate {
    let factors = DemandFactors {
        time_factor: time_factor(at.hour(), config),
        day_factor: day_factor(at.weekday(), config),
        weather_factor: config.weather_factor,
    };

    let raw = config.base_orders * factors.time_factor * factors.day_factor * factors.weather_factor;
    // Saturating cast; negative or NaN configs come out as zero.
    let predicted_orders = raw.floor() as u32;

    DemandEstimate {
        area,
        predicted_orders,
        time_window_minutes: window_minutes,
        confidence_score: config.confidence,
        factors,
    }
}

fn time_factor(hour: u32, config: &DemandConfig) -> f64 {
    config
        .hour_bands
        .iter()
        .find(|band| band.contains(hour))
        .map_or(config.off_peak_factor, |band| band.factor)
}

fn day_factor(day: Weekday, config: &DemandConfig) -> f64 {
    match day {
        Weekday::Sat | Weekday::Sun => config.weekend_factor,
        _ => config.weekday_factor,
    }
}
