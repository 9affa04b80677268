//! Great-circle distance and the distance-based travel time heuristic.
//!
//! Used directly for every distance the engine reports, and as the fallback
//! when the routing provider is missing or fails. Less accurate than a road
//! router (ignores roads) but always available.

use crate::config::HeuristicConfig;
use crate::types::Coordinate;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points. `clamp`
    // keeps NaN as NaN.
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Heuristic travel time: `max(min, round(km / speed * 60) + buffer)`.
pub fn estimate_minutes(from: Coordinate, to: Coordinate, config: &HeuristicConfig) -> u32 {
    minutes_for_km(distance_km(from, to), config)
}

/// Convert a distance in km to heuristic travel minutes.
pub fn minutes_for_km(km: f64, config: &HeuristicConfig) -> u32 {
    let driving = (km / config.urban_speed_kmh * 60.0).round();
    // Saturating cast; NaN becomes 0 and is lifted by the floor below.
    let driving = driving as u32;
    driving
        .saturating_add(config.dwell_buffer_minutes)
        .max(config.min_travel_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = distance_km(at(36.1, -115.1), at(36.1, -115.1));
        assert_eq!(dist, 0.0, "Same point should have zero distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas (36.17, -115.14) to Los Angeles (34.05, -118.24)
        // Actual distance ~370 km
        let dist = distance_km(at(36.17, -115.14), at(34.05, -118.24));
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let pairs = [
            (at(36.1, -115.1), at(36.2, -115.2)),
            (at(0.0, 0.0), at(0.0, 10.0)),
            (at(-33.86, 151.2), at(51.5, -0.12)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_km(a, b), distance_km(b, a));
        }
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        // 2 * pi * 6371 / 360
        let dist = distance_km(at(0.0, 0.0), at(0.0, 1.0));
        assert!((dist - 111.195).abs() < 0.01, "got {}", dist);
    }

    #[test]
    fn test_antipodal_points_do_not_nan() {
        let dist = distance_km(at(0.0, 0.0), at(0.0, 180.0));
        assert!(dist.is_finite());
        assert!((dist - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_input_stays_nan() {
        assert!(distance_km(at(f64::NAN, 0.0), at(0.0, 0.0)).is_nan());
        assert!(distance_km(at(0.0, 0.0), at(0.0, f64::NAN)).is_nan());
    }

    #[test]
    fn test_reasonable_travel_time() {
        let config = HeuristicConfig::default();
        // 10 km at 25 km/h = 24 minutes, plus 5 minutes dwell
        assert_eq!(minutes_for_km(10.0, &config), 29);
    }

    #[test]
    fn test_short_hops_hit_the_floor() {
        let config = HeuristicConfig::default();
        assert_eq!(minutes_for_km(0.0, &config), 5);
        assert_eq!(minutes_for_km(0.1, &config), 5);
    }

    #[test]
    fn test_heuristic_rounds_to_nearest_minute() {
        let config = HeuristicConfig::default();
        // 1 km -> 2.4 min -> 2, 1.25 km -> 3.0 min -> 3, 1.3 km -> 3.12 -> 3
        assert_eq!(minutes_for_km(1.0, &config), 7);
        assert_eq!(minutes_for_km(1.25, &config), 8);
        assert_eq!(minutes_for_km(1.3, &config), 8);
        // 1.5 km -> 3.6 min -> 4
        assert_eq!(minutes_for_km(1.5, &config), 9);
    }

    #[test]
    fn test_custom_speed() {
        let config = HeuristicConfig {
            urban_speed_kmh: 40.0,
            ..HeuristicConfig::default()
        };
        // 10 km at 40 km/h = 15 minutes, plus 5
        assert_eq!(minutes_for_km(10.0, &config), 20);
    }
}
